use std::sync::Arc;

use crate::domains::documents::services::{DocumentService, FileService};
use crate::shared::config::Config;
use crate::shared::database::Database;
use crate::shared::storage::{FileStorage, LocalFileStorage};

#[derive(Clone)]
pub struct DocumentsState {
    pub document_service: DocumentService,
    pub file_service: FileService,
}

impl DocumentsState {
    pub fn new(db: Database, config: &Config) -> Self {
        let storage: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::new(&config.media_root));

        Self {
            document_service: DocumentService::new(db.clone()),
            file_service: FileService::new(db, storage),
        }
    }
}

use std::sync::Arc;

use axum::http::Method;
use uuid::Uuid;

use crate::domains::documents::models::{DocumentFile, FileUpload};
use crate::shared::authz::check_object_permission;
use crate::shared::database::{Database, DocumentFileRepository, DocumentRepository};
use crate::shared::errors::{ApiError, FieldErrors};
use crate::shared::storage::FileStorage;

pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "jpg", "jpeg", "png", "xls", "xlsx",
];

#[derive(Clone)]
pub struct FileService {
    db: Database,
    storage: Arc<dyn FileStorage>,
}

impl FileService {
    pub fn new(db: Database, storage: Arc<dyn FileStorage>) -> Self {
        Self { db, storage }
    }

    fn files(&self) -> DocumentFileRepository {
        DocumentFileRepository::new(self.db.pool().clone())
    }

    fn documents(&self) -> DocumentRepository {
        DocumentRepository::new(self.db.pool().clone())
    }

    pub async fn list(&self) -> Result<Vec<DocumentFile>, ApiError> {
        self.files().list().await.map_err(db_error)
    }

    pub async fn get(&self, id: Uuid) -> Result<DocumentFile, ApiError> {
        self.files()
            .find_by_id(id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ApiError::NotFound("File not found".to_string()))
    }

    /// Validate and store an upload. Only the document's owner may attach
    /// files to it.
    pub async fn upload(
        &self,
        requester_id: i64,
        upload: FileUpload,
    ) -> Result<DocumentFile, ApiError> {
        let document = self
            .documents()
            .find_by_id(upload.document_id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| {
                ApiError::Validation(FieldErrors::field("document", "Document does not exist."))
            })?;
        check_object_permission(&Method::POST, document.created_by, requester_id)?;

        let mut errors = FieldErrors::new();
        match extension_of(&upload.original_name) {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {}
            _ => errors.push(
                "file",
                "File type is not allowed. Allowed: pdf, doc, docx, jpg, jpeg, png, xls, xlsx.",
            ),
        }
        if upload.bytes.len() > MAX_FILE_SIZE {
            errors.push("file", "File exceeds the 10 MiB size limit.");
        }
        if upload.bytes.is_empty() {
            errors.push("file", "The submitted file is empty.");
        }
        errors.into_result()?;

        let id = Uuid::new_v4();
        let stored_name = sanitize_file_name(&upload.original_name);
        let relative_path = format!("documents/{}/{}_{}", document.id, id, stored_name);

        self.storage
            .save(&relative_path, &upload.bytes)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to store file: {e:#}")))?;

        self.files()
            .create(
                id,
                document.id,
                &relative_path,
                &upload.original_name,
                upload.bytes.len() as i64,
                requester_id,
            )
            .await
            .map_err(db_error)
    }

    /// Remove a file record and its stored binary. Only the owner of the
    /// parent document may delete.
    pub async fn delete(&self, id: Uuid, requester_id: i64) -> Result<(), ApiError> {
        let file = self.get(id).await?;
        let document = self
            .documents()
            .find_by_id(file.document_id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ApiError::NotFound("File not found".to_string()))?;
        check_object_permission(&Method::DELETE, document.created_by, requester_id)?;

        let deleted = self.files().delete(file.id).await.map_err(db_error)?;
        if !deleted {
            return Err(ApiError::NotFound("File not found".to_string()));
        }

        if let Err(e) = self.storage.remove(&file.file_path).await {
            // The row is gone; an orphaned binary only wastes disk.
            tracing::warn!("failed to remove stored file {}: {e:#}", file.file_path);
        }
        Ok(())
    }
}

fn db_error(e: anyhow::Error) -> ApiError {
    ApiError::Database(format!("{e:#}"))
}

fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Keep only characters safe for a file name on disk.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_parsing() {
        assert_eq!(extension_of("report.PDF"), Some("pdf".to_string()));
        assert_eq!(extension_of("archive.tar.xlsx"), Some("xlsx".to_string()));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn allowed_extensions_match_the_list() {
        for ext in ["pdf", "doc", "docx", "jpg", "jpeg", "png", "xls", "xlsx"] {
            assert!(ALLOWED_EXTENSIONS.contains(&ext));
        }
        assert!(!ALLOWED_EXTENSIONS.contains(&"exe"));
        assert!(!ALLOWED_EXTENSIONS.contains(&"sh"));
    }

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(sanitize_file_name("a report (v2).pdf"), "a_report__v2_.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_name(""), "upload");
    }
}

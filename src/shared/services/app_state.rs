use crate::domains::account::services::AccountState;
use crate::domains::documents::services::DocumentsState;
use crate::shared::config::Config;
use crate::shared::database::Database;

/// Application state: the shared database plus each domain's wired services.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub account_state: AccountState,
    pub documents_state: DocumentsState,
}

impl AppState {
    pub fn new(db: Database, config: &Config) -> Self {
        let account_state = AccountState::new(db.clone(), config);
        let documents_state = DocumentsState::new(db.clone(), config);

        Self {
            db,
            account_state,
            documents_state,
        }
    }
}

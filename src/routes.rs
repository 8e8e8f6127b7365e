// Combines all domain routers under /api.
use axum::Router;

use crate::domains::account::routes::create_account_router;
use crate::domains::documents::routes::{create_documents_router, create_files_router};
use crate::shared::services::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/account", create_account_router())
        .nest("/api/documents", create_documents_router())
        .nest("/api/files", create_files_router())
}

use crate::domains::documents::handlers::{document_handler, file_handler};
use crate::domains::documents::services::file_service::MAX_FILE_SIZE;
use crate::shared::services::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};

/// Documents router, mounted under /api/documents.
pub fn create_documents_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(document_handler::list_documents).post(document_handler::create_document),
        )
        .route(
            "/:slug",
            get(document_handler::get_document)
                .patch(document_handler::update_document)
                .delete(document_handler::delete_document),
        )
}

/// Files router, mounted under /api/files. The body limit leaves headroom
/// over the per-file cap so oversized uploads fail validation, not framing.
pub fn create_files_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(file_handler::list_files).post(file_handler::upload_file),
        )
        .route(
            "/:id",
            get(file_handler::get_file).delete(file_handler::delete_file),
        )
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 64 * 1024))
}

use crate::domains::documents::models::{
    CreateDocumentRequest, DocumentResponse, UpdateDocumentRequest,
};
use crate::shared::errors::ApiError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/documents",
    responses(
        (status = 200, description = "All documents, newest first", body = [DocumentResponse]),
        (status = 401, description = "Missing or invalid access token"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Documents"
)]
pub async fn list_documents(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<DocumentResponse>>, ApiError> {
    let documents = app_state.documents_state.document_service.list().await?;
    Ok(Json(documents.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document created", body = DocumentResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid access token"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Documents"
)]
pub async fn create_document(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), ApiError> {
    let document = app_state
        .documents_state
        .document_service
        .create(user.user_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(document.into())))
}

#[utoipa::path(
    get,
    path = "/api/documents/{slug}",
    params(("slug" = String, Path, description = "Document slug")),
    responses(
        (status = 200, description = "Document", body = DocumentResponse),
        (status = 401, description = "Missing or invalid access token"),
        (status = 404, description = "No document with this slug"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Documents"
)]
pub async fn get_document(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(slug): Path<String>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let document = app_state
        .documents_state
        .document_service
        .get_by_slug(&slug)
        .await?;

    Ok(Json(document.into()))
}

#[utoipa::path(
    patch,
    path = "/api/documents/{slug}",
    params(("slug" = String, Path, description = "Document slug")),
    request_body = UpdateDocumentRequest,
    responses(
        (status = 200, description = "Updated document", body = DocumentResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Caller does not own the document"),
        (status = 404, description = "No document with this slug"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Documents"
)]
pub async fn update_document(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(slug): Path<String>,
    Json(request): Json<UpdateDocumentRequest>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let document = app_state
        .documents_state
        .document_service
        .update(&slug, user.user_id, request)
        .await?;

    Ok(Json(document.into()))
}

#[utoipa::path(
    delete,
    path = "/api/documents/{slug}",
    params(("slug" = String, Path, description = "Document slug")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Caller does not own the document"),
        (status = 404, description = "No document with this slug"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Documents"
)]
pub async fn delete_document(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    app_state
        .documents_state
        .document_service
        .delete(&slug, user.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

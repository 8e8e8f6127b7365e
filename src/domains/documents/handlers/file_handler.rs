use crate::domains::documents::models::{DocumentFileResponse, FileUpload};
use crate::shared::errors::{ApiError, FieldErrors};
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/files",
    responses(
        (status = 200, description = "All uploaded files, newest first", body = [DocumentFileResponse]),
        (status = 401, description = "Missing or invalid access token"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Files"
)]
pub async fn list_files(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<DocumentFileResponse>>, ApiError> {
    let files = app_state.documents_state.file_service.list().await?;
    Ok(Json(files.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/files",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "Form with a `document` id field and a `file` part"
    ),
    responses(
        (status = 201, description = "File stored", body = DocumentFileResponse),
        (status = 400, description = "Missing fields, bad extension or oversized file"),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Caller does not own the target document"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Files"
)]
pub async fn upload_file(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentFileResponse>), ApiError> {
    let mut document_id: Option<Uuid> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(FieldErrors::field("file", e.to_string())))?
    {
        match field.name() {
            Some("document") => {
                let raw = field.text().await.map_err(|e| {
                    ApiError::Validation(FieldErrors::field("document", e.to_string()))
                })?;
                let id = raw.trim().parse::<Uuid>().map_err(|_| {
                    ApiError::Validation(FieldErrors::field(
                        "document",
                        "Must be a valid document id.",
                    ))
                })?;
                document_id = Some(id);
            }
            Some("file") => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::Validation(FieldErrors::field("file", e.to_string()))
                })?;
                file = Some((name, bytes.to_vec()));
            }
            // Unknown parts are ignored, matching lenient form handling.
            _ => {}
        }
    }

    let mut errors = FieldErrors::new();
    if document_id.is_none() {
        errors.push("document", "This field is required.");
    }
    if file.is_none() {
        errors.push("file", "No file was submitted.");
    }
    errors.into_result()?;

    let (Some(document_id), Some((original_name, bytes))) = (document_id, file) else {
        return Err(ApiError::Internal("Lost multipart fields".to_string()));
    };

    let stored = app_state
        .documents_state
        .file_service
        .upload(
            user.user_id,
            FileUpload {
                document_id,
                original_name,
                bytes,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(stored.into())))
}

#[utoipa::path(
    get,
    path = "/api/files/{id}",
    params(("id" = Uuid, Path, description = "File id")),
    responses(
        (status = 200, description = "File metadata", body = DocumentFileResponse),
        (status = 401, description = "Missing or invalid access token"),
        (status = 404, description = "No file with this id"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Files"
)]
pub async fn get_file(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentFileResponse>, ApiError> {
    let file = app_state.documents_state.file_service.get(id).await?;
    Ok(Json(file.into()))
}

#[utoipa::path(
    delete,
    path = "/api/files/{id}",
    params(("id" = Uuid, Path, description = "File id")),
    responses(
        (status = 204, description = "File deleted"),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Caller does not own the parent document"),
        (status = 404, description = "No file with this id"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Files"
)]
pub async fn delete_file(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .documents_state
        .file_service
        .delete(id, user.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

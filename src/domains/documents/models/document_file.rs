use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub id: Uuid,
    pub document_id: Uuid,
    pub file_path: String,
    pub original_name: String,
    pub size_bytes: i64,
    pub uploaded_by: Option<i64>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentFileResponse {
    pub id: Uuid,
    pub document: Uuid,
    pub file: String,
    pub original_name: String,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl From<DocumentFile> for DocumentFileResponse {
    fn from(f: DocumentFile) -> Self {
        Self {
            id: f.id,
            document: f.document_id,
            file: f.file_path,
            original_name: f.original_name,
            size: f.size_bytes,
            uploaded_at: f.uploaded_at,
        }
    }
}

/// Fields extracted from the multipart upload form.
#[derive(Debug)]
pub struct FileUpload {
    pub document_id: Uuid,
    pub original_name: String,
    pub bytes: Vec<u8>,
}

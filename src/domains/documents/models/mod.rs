pub mod document;
pub mod document_file;

pub use document::{CreateDocumentRequest, Document, DocumentResponse, UpdateDocumentRequest};
pub use document_file::{DocumentFile, DocumentFileResponse, FileUpload};

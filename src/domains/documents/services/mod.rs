pub mod document_service;
pub mod file_service;
pub mod state;

pub use document_service::DocumentService;
pub use file_service::FileService;
pub use state::DocumentsState;

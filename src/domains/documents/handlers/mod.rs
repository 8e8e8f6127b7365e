pub mod document_handler;
pub mod file_handler;

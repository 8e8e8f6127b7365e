pub mod document_file_repository;
pub mod document_repository;

pub use document_file_repository::*;
pub use document_repository::*;

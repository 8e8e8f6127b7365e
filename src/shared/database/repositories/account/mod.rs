pub mod blacklist_repository;
pub mod user_repository;

pub use blacklist_repository::*;
pub use user_repository::*;

// Shared module
pub mod authz;
pub mod config;
pub mod database;
pub mod errors;
pub mod mailer;
pub mod middleware;
pub mod services;
pub mod storage;
pub mod utils;

pub use config::*;
pub use database::*;
pub use errors::*;
pub use mailer::*;
pub use middleware::*;
pub use services::*;
pub use storage::*;
pub use utils::*;

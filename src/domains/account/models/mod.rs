// Account domain models
pub mod auth;
pub mod claims;
pub mod user;

pub use auth::*;
pub use claims::*;
pub use user::*;

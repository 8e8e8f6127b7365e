use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// User record as stored. The password hash never leaves the service layer;
/// responses go through [`UserResponse`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outward-facing user representation.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "user@example.com")]
    pub email: String,

    #[schema(example = "Jane Doe")]
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            name: user.name,
        }
    }
}

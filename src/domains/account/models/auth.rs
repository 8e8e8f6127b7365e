use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registration request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "user@example.com")]
    pub email: String,

    #[schema(example = "Sup3rSecret!")]
    pub password: String,

    #[schema(example = "Jane Doe")]
    pub name: String,
}

/// Credential login request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRequest {
    #[schema(example = "user@example.com")]
    pub email: String,

    #[schema(example = "Sup3rSecret!")]
    pub password: String,
}

/// Access/refresh pair issued on login.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPairResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access: String,

    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// New access token minted from a refresh token.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

/// Logout request. The field is optional so a missing value produces the
/// documented 400 detail instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LogoutRequest {
    pub refresh: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMeRequest {
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordChangeRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordResetRequest {
    #[schema(example = "user@example.com")]
    pub email: String,
}

/// Ticket confirmation: the uid/token pair from the reset link plus the
/// replacement password.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordResetConfirmRequest {
    pub uid: String,
    pub token: String,
    pub new_password: String,
}

/// Plain detail message used by several endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct DetailResponse {
    #[schema(example = "Password changed successfully.")]
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::shared::errors::ApiError;
use crate::shared::services::AppState;

/// Authenticated caller, extracted from the bearer access token.
///
/// Using this extractor in a handler signature is the authentication gate:
/// the handler body never runs for anonymous or badly-credentialed requests.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or_else(|| ApiError::Authentication("Missing authorization header".to_string()))?
            .to_str()
            .map_err(|_| ApiError::Authentication("Invalid authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Authentication(
                "Invalid authorization format. Expected: 'Bearer <token>'".to_string(),
            )
        })?;

        let claims = state
            .account_state
            .token_service
            .verify_access(token.trim())?;

        Ok(AuthenticatedUser {
            user_id: claims.user_id,
            email: claims.email,
        })
    }
}

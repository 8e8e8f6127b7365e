use std::collections::BTreeMap;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Field-level validation errors, collected per field rather than
/// short-circuited at the first failure. Serializes to the conventional
/// `{"field": ["message", ...]}` body.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn extend(&mut self, field: &str, messages: Vec<String>) {
        if !messages.is_empty() {
            self.0.entry(field.to_string()).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Turn the accumulated errors into a failure, or `Ok` if none were added.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self))
        }
    }

    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }
}

/// Request-level error taxonomy. Only this boundary layer knows how each
/// category maps onto a transport status and body shape.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed input, weak password, duplicate email. 400 with per-field body.
    #[error("validation failed")]
    Validation(FieldErrors),

    /// Missing/invalid/expired access token or bad login credentials. 401.
    #[error("{0}")]
    Authentication(String),

    /// Authenticated but not allowed to touch the resource. 403.
    #[error("{0}")]
    Forbidden(String),

    /// Refresh token problems on logout. 400 with `{"detail": ...}` by
    /// convention; signature, expiry and blacklist hits are deliberately
    /// indistinguishable here.
    #[error("{0}")]
    Token(String),

    /// Invalid or expired password reset ticket. 400; tampered and expired
    /// tickets surface identically.
    #[error("Invalid or expired reset token")]
    InvalidResetTicket,

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_token() -> Self {
        ApiError::Authentication("Token is invalid or expired".to_string())
    }

    pub fn blacklisted() -> Self {
        ApiError::Token("Token is blacklisted or invalid".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                serde_json::to_value(errors).unwrap_or_else(|_| json!({})),
            ),
            ApiError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, json!({ "detail": msg }))
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, json!({ "detail": msg })),
            ApiError::Token(msg) => (StatusCode::BAD_REQUEST, json!({ "detail": msg })),
            ApiError::InvalidResetTicket => (
                StatusCode::BAD_REQUEST,
                json!({ "detail": self.to_string() }),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "detail": msg })),
            ApiError::Database(msg) | ApiError::Internal(msg) => {
                // Internal detail goes to the log, never to the client.
                tracing::error!("request failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_collect_per_field() {
        let mut errors = FieldErrors::new();
        errors.push("password", "too short");
        errors.push("password", "entirely numeric");
        errors.push("email", "already taken");

        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value["password"].as_array().unwrap().len(), 2);
        assert_eq!(value["email"][0], "already taken");
    }

    #[test]
    fn empty_field_errors_are_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(FieldErrors::field("title", "required").into_result().is_err());
    }

    #[test]
    fn extend_skips_empty_message_lists() {
        let mut errors = FieldErrors::new();
        errors.extend("password", vec![]);
        assert!(errors.is_empty());
    }
}

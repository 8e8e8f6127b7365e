use axum::http::Method;

use crate::shared::errors::ApiError;

/// Ownership gate, evaluated after authentication: safe methods are open to
/// any authenticated caller, mutating methods only to the resource owner.
///
/// A pure function of `(requester, owner, method)` so it can be tested
/// without a request in flight.
pub fn check_object_permission(
    method: &Method,
    owner_id: i64,
    requester_id: i64,
) -> Result<(), ApiError> {
    if is_safe_method(method) {
        return Ok(());
    }

    if owner_id == requester_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You do not have permission to modify this resource".to_string(),
        ))
    }
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

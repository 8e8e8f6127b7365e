use crate::domains::account::models::{
    AccessTokenResponse, DetailResponse, LogoutRequest, PasswordChangeRequest,
    PasswordResetConfirmRequest, PasswordResetRequest, RefreshRequest, RegisterRequest,
    TokenPairResponse, TokenRequest, UpdateMeRequest, UserResponse,
};
use crate::shared::errors::ApiError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{extract::State, http::StatusCode, Json};

#[utoipa::path(
    post,
    path = "/api/account/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation failed, errors keyed by field"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Account"
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = app_state
        .account_state
        .account_service
        .register(request)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    post,
    path = "/api/account/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Access and refresh tokens", body = TokenPairResponse),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Account"
)]
pub async fn token(
    State(app_state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let (access, refresh) = app_state
        .account_state
        .account_service
        .login(request)
        .await?;

    Ok(Json(TokenPairResponse { access, refresh }))
}

#[utoipa::path(
    post,
    path = "/api/account/token/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 401, description = "Invalid, expired or blacklisted refresh token"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Account"
)]
pub async fn token_refresh(
    State(app_state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let access = app_state
        .account_state
        .account_service
        .refresh_access_token(&request.refresh)
        .await?;

    Ok(Json(AccessTokenResponse { access }))
}

#[utoipa::path(
    post,
    path = "/api/account/logout",
    request_body = LogoutRequest,
    responses(
        (status = 205, description = "Refresh token revoked"),
        (status = 400, description = "Missing, invalid or already blacklisted refresh token"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Account"
)]
pub async fn logout(
    State(app_state): State<AppState>,
    request: Option<Json<LogoutRequest>>,
) -> Result<StatusCode, ApiError> {
    // The body and the refresh field are both optional at the wire level;
    // their absence is a 400, not a deserialization failure.
    let refresh = request
        .and_then(|Json(body)| body.refresh)
        .ok_or_else(|| ApiError::Token("Refresh token is required".to_string()))?;

    app_state
        .account_state
        .account_service
        .logout(&refresh)
        .await?;

    Ok(StatusCode::RESET_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/account/me",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid access token"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Account"
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = app_state
        .account_state
        .account_service
        .get_user(user.user_id)
        .await?;

    Ok(Json(user.into()))
}

#[utoipa::path(
    patch,
    path = "/api/account/me",
    request_body = UpdateMeRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid access token"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Account"
)]
pub async fn update_me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateMeRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = app_state
        .account_state
        .account_service
        .update_profile(user.user_id, request.name)
        .await?;

    Ok(Json(user.into()))
}

#[utoipa::path(
    post,
    path = "/api/account/set_password",
    request_body = PasswordChangeRequest,
    responses(
        (status = 200, description = "Password changed", body = DetailResponse),
        (status = 400, description = "Wrong old password or weak new password"),
        (status = 401, description = "Missing or invalid access token"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = [])),
    tag = "Account"
)]
pub async fn set_password(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<PasswordChangeRequest>,
) -> Result<Json<DetailResponse>, ApiError> {
    app_state
        .account_state
        .account_service
        .set_password(user.user_id, request)
        .await?;

    Ok(Json(DetailResponse::new("Password updated successfully.")))
}

#[utoipa::path(
    post,
    path = "/api/account/password/reset",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "Always succeeds, never reveals whether the email exists", body = DetailResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Account"
)]
pub async fn password_reset(
    State(app_state): State<AppState>,
    Json(request): Json<PasswordResetRequest>,
) -> Result<Json<DetailResponse>, ApiError> {
    app_state
        .account_state
        .account_service
        .request_password_reset(&request.email)
        .await?;

    Ok(Json(DetailResponse::new(
        "If the email is registered, a reset link has been sent.",
    )))
}

#[utoipa::path(
    post,
    path = "/api/account/password/reset/confirm",
    request_body = PasswordResetConfirmRequest,
    responses(
        (status = 200, description = "Password reset", body = DetailResponse),
        (status = 400, description = "Invalid or expired reset ticket, or weak new password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Account"
)]
pub async fn password_reset_confirm(
    State(app_state): State<AppState>,
    Json(request): Json<PasswordResetConfirmRequest>,
) -> Result<Json<DetailResponse>, ApiError> {
    app_state
        .account_state
        .account_service
        .confirm_password_reset(request)
        .await?;

    Ok(Json(DetailResponse::new("Password has been reset.")))
}

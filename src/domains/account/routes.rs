use crate::domains::account::handlers::account_handler;
use crate::shared::services::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Account router, mounted under /api/account.
pub fn create_account_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(account_handler::register))
        .route("/token", post(account_handler::token))
        .route("/token/refresh", post(account_handler::token_refresh))
        .route("/logout", post(account_handler::logout))
        .route(
            "/me",
            get(account_handler::get_me).patch(account_handler::update_me),
        )
        .route("/set_password", post(account_handler::set_password))
        .route("/password/reset", post(account_handler::password_reset))
        .route(
            "/password/reset/confirm",
            post(account_handler::password_reset_confirm),
        )
}

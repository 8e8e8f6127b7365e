// Wire-level checks for the logout endpoint, whose body handling is looser
// than the other routes: the request body and the refresh field are both
// optional, and their absence must map to a specific 400 detail rather than
// a deserialization rejection.

mod common;
use common::*;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use docvault_api::domains::account::models::{RegisterRequest, TokenRequest};
use docvault_api::routes::create_router;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not JSON")
}

fn logout_request(body: Body, json: bool) -> Request<Body> {
    let mut builder = Request::post("/api/account/logout");
    if json {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    builder.body(body).expect("failed to build request")
}

#[tokio::test]
async fn logout_without_body_reports_missing_refresh_token() {
    let Some(ctx) = setup_test().await else { return };
    let app = create_router().with_state(ctx.state.clone());

    let response = app
        .oneshot(logout_request(Body::empty(), false))
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Refresh token is required");
}

#[tokio::test]
async fn logout_without_refresh_field_reports_missing_refresh_token() {
    let Some(ctx) = setup_test().await else { return };
    let app = create_router().with_state(ctx.state.clone());

    let response = app
        .oneshot(logout_request(Body::from("{}"), true))
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Refresh token is required");
}

#[tokio::test]
async fn logout_returns_205_then_400_on_replay() {
    let Some(ctx) = setup_test().await else { return };
    let account = &ctx.state.account_state.account_service;
    let app = create_router().with_state(ctx.state.clone());

    let email = unique_email("wire-logout");
    account
        .register(RegisterRequest {
            email: email.clone(),
            password: "Sup3rSecret!".to_string(),
            name: "Wire Tester".to_string(),
        })
        .await
        .expect("registration failed");
    let (_, refresh) = account
        .login(TokenRequest {
            email,
            password: "Sup3rSecret!".to_string(),
        })
        .await
        .expect("login failed");

    let payload = serde_json::json!({ "refresh": refresh }).to_string();

    let response = app
        .clone()
        .oneshot(logout_request(Body::from(payload.clone()), true))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::RESET_CONTENT);

    // Replaying the same refresh token is a 400 with the revocation detail.
    let response = app
        .oneshot(logout_request(Body::from(payload), true))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Token is blacklisted or invalid");
}

// Password reset protocol against a live database. The ticket generator is
// deterministic given the signing secret, so tests mint tickets directly
// instead of scraping them out of the mailer.

mod common;
use common::*;

use docvault_api::domains::account::models::{
    PasswordResetConfirmRequest, RegisterRequest, TokenRequest,
};
use docvault_api::domains::account::services::ResetTokenGenerator;
use docvault_api::shared::errors::ApiError;

// Must match the secret and TTL in common::test_config.
fn ticket_generator() -> ResetTokenGenerator {
    ResetTokenGenerator::new("integration-test-secret", 2)
}

async fn register(ctx: &TestContext, email: &str) -> docvault_api::domains::account::models::User {
    ctx.state
        .account_state
        .account_service
        .register(RegisterRequest {
            email: email.to_string(),
            password: "Sup3rSecret!".to_string(),
            name: "Reset Tester".to_string(),
        })
        .await
        .expect("registration failed")
}

#[tokio::test]
async fn reset_request_never_reveals_account_existence() {
    let Some(ctx) = setup_test().await else { return };
    let account = &ctx.state.account_state.account_service;

    let email = unique_email("reveal");
    register(&ctx, &email).await;

    // Known and unknown addresses produce the identical outcome.
    account
        .request_password_reset(&email)
        .await
        .expect("reset request for known email failed");
    account
        .request_password_reset(&unique_email("nobody"))
        .await
        .expect("reset request for unknown email failed");
}

#[tokio::test]
async fn full_reset_flow_sets_the_new_password() {
    let Some(ctx) = setup_test().await else { return };
    let account = &ctx.state.account_state.account_service;

    let email = unique_email("reset");
    let user = register(&ctx, &email).await;

    let uid = ResetTokenGenerator::encode_uid(user.id);
    let token = ticket_generator().make_token(&user);

    account
        .confirm_password_reset(PasswordResetConfirmRequest {
            uid,
            token,
            new_password: "Fr3shSecret!".to_string(),
        })
        .await
        .expect("reset confirm failed");

    // Old credential is dead, new one works.
    assert!(account
        .login(TokenRequest {
            email: email.clone(),
            password: "Sup3rSecret!".to_string(),
        })
        .await
        .is_err());
    account
        .login(TokenRequest {
            email,
            password: "Fr3shSecret!".to_string(),
        })
        .await
        .expect("login with reset password failed");
}

#[tokio::test]
async fn used_ticket_does_not_work_twice() {
    let Some(ctx) = setup_test().await else { return };
    let account = &ctx.state.account_state.account_service;

    let email = unique_email("single-use");
    let user = register(&ctx, &email).await;

    let uid = ResetTokenGenerator::encode_uid(user.id);
    let token = ticket_generator().make_token(&user);

    account
        .confirm_password_reset(PasswordResetConfirmRequest {
            uid: uid.clone(),
            token: token.clone(),
            new_password: "Fr3shSecret!".to_string(),
        })
        .await
        .expect("first confirm failed");

    // The signature was keyed on the old hash; the reset consumed it.
    let err = account
        .confirm_password_reset(PasswordResetConfirmRequest {
            uid,
            token,
            new_password: "Y3tAnother!".to_string(),
        })
        .await
        .expect_err("re-used ticket was accepted");
    assert!(matches!(err, ApiError::InvalidResetTicket));
}

#[tokio::test]
async fn tampered_uid_or_token_is_rejected() {
    let Some(ctx) = setup_test().await else { return };
    let account = &ctx.state.account_state.account_service;

    let email = unique_email("tamper");
    let user = register(&ctx, &email).await;

    let uid = ResetTokenGenerator::encode_uid(user.id);
    let token = ticket_generator().make_token(&user);

    // Garbage uid.
    let err = account
        .confirm_password_reset(PasswordResetConfirmRequest {
            uid: "!!!not-base64!!!".to_string(),
            token: token.clone(),
            new_password: "Fr3shSecret!".to_string(),
        })
        .await
        .expect_err("garbage uid was accepted");
    assert!(matches!(err, ApiError::InvalidResetTicket));

    // Flipped signature byte.
    let mut bad_token = token.clone();
    let last = bad_token.pop().map(|c| if c == 'a' { 'b' } else { 'a' });
    bad_token.extend(last);
    let err = account
        .confirm_password_reset(PasswordResetConfirmRequest {
            uid: uid.clone(),
            token: bad_token,
            new_password: "Fr3shSecret!".to_string(),
        })
        .await
        .expect_err("tampered token was accepted");
    assert!(matches!(err, ApiError::InvalidResetTicket));

    // A ticket minted for a different account does not transfer.
    let other = register(&ctx, &unique_email("other")).await;
    let err = account
        .confirm_password_reset(PasswordResetConfirmRequest {
            uid: ResetTokenGenerator::encode_uid(other.id),
            token,
            new_password: "Fr3shSecret!".to_string(),
        })
        .await
        .expect_err("ticket for another account was accepted");
    assert!(matches!(err, ApiError::InvalidResetTicket));
}

#[tokio::test]
async fn weak_replacement_password_fails_validation() {
    let Some(ctx) = setup_test().await else { return };
    let account = &ctx.state.account_state.account_service;

    let email = unique_email("weakpw");
    let user = register(&ctx, &email).await;

    let err = account
        .confirm_password_reset(PasswordResetConfirmRequest {
            uid: ResetTokenGenerator::encode_uid(user.id),
            token: ticket_generator().make_token(&user),
            new_password: "1234".to_string(),
        })
        .await
        .expect_err("weak password was accepted");
    match err {
        ApiError::Validation(errors) => assert!(errors.contains("new_password")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

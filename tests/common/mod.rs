// Shared helpers for the live-database integration tests.
//
// These tests need a PostgreSQL instance; point TEST_DATABASE_URL at an
// empty database to run them. Without it every test skips and passes.
//
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let Some(ctx) = setup_test().await else { return };
//     // test code...
// }
// ```

#![allow(dead_code)]

use std::path::PathBuf;

use docvault_api::shared::config::Config;
use docvault_api::shared::database::Database;
use docvault_api::shared::services::AppState;

pub struct TestContext {
    pub state: AppState,
    pub db: Database,
}

pub fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        cors_origin: "http://localhost:3000".to_string(),
        media_root: PathBuf::from(std::env::temp_dir()).join("docvault-test-media"),
        access_token_minutes: 15,
        refresh_token_days: 7,
        reset_token_hours: 2,
        reset_url_base: "http://localhost:3000/reset-password/".to_string(),
    }
}

/// Connect and migrate. Returns None (skipping the test) when
/// TEST_DATABASE_URL is not set. Tests run in parallel against the same
/// database, so each test creates its own users via `unique_email` instead
/// of relying on a wiped table.
pub async fn setup_test() -> Option<TestContext> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return None;
    };

    let db = Database::new(&database_url)
        .await
        .expect("Failed to connect to test database");
    db.initialize()
        .await
        .expect("Failed to run migrations on test database");

    let config = test_config(&database_url);
    let state = AppState::new(db.clone(), &config);

    Some(TestContext { state, db })
}

/// Delete everything in FK order so each test starts clean.
pub async fn cleanup_test_data(db: &Database) {
    let pool = db.pool();
    for table in ["document_files", "documents", "token_blacklist", "users"] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(pool)
            .await
            .unwrap_or_else(|e| panic!("Failed to clean table {table}: {e}"));
    }
}

/// Unique-per-test email so parallel tests never collide on the unique index.
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", uuid::Uuid::new_v4().simple())
}

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Revocation list for refresh tokens, keyed by jti.
pub struct BlacklistRepository {
    pool: PgPool,
}

impl BlacklistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a jti into the blacklist. Atomic upsert: revoking an already
    /// revoked token is a no-op, never an error.
    pub async fn insert(&self, jti: Uuid, user_id: i64, expires_at: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO token_blacklist (jti, user_id, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(jti)
        .bind(user_id)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .context("Failed to blacklist token")?;

        Ok(())
    }

    pub async fn contains(&self, jti: Uuid) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS(SELECT 1 FROM token_blacklist WHERE jti = $1) AS present
            "#,
        )
        .bind(jti)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check token blacklist")?;

        Ok(row.get("present"))
    }

    /// Remove entries whose token has expired on its own; they can no longer
    /// verify regardless of blacklist state.
    pub async fn delete_expired(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM token_blacklist WHERE expires_at < NOW()
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to delete expired blacklist entries")?;

        Ok(result.rows_affected())
    }
}

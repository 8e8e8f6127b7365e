use anyhow::{Context, Result};
use sqlx::{PgPool, Row};

use crate::domains::account::models::User;

/// Returned by `create_user` so callers can tell a lost uniqueness race
/// apart from an infrastructure failure.
#[derive(Debug)]
pub enum CreateUserOutcome {
    Created(User),
    DuplicateEmail,
}

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::postgres::PgRow) -> User {
        User {
            id: row.get("id"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            name: row.get("name"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<CreateUserOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, name, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(CreateUserOutcome::Created(Self::row_to_user(&row))),
            Err(sqlx::Error::Database(db_err)) if is_unique_violation(&*db_err) => {
                Ok(CreateUserOutcome::DuplicateEmail)
            }
            Err(e) => Err(e).context("Failed to create user"),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, name, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by email")?;

        Ok(row.map(|r| Self::row_to_user(&r)))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by id")?;

        Ok(row.map(|r| Self::row_to_user(&r)))
    }

    pub async fn update_name(&self, id: i64, name: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, password_hash, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update user name")?;

        Ok(row.map(|r| Self::row_to_user(&r)))
    }

    /// Compare-and-swap the password hash: the write only lands if the stored
    /// hash still equals `expected_hash`. Returns false when the hash changed
    /// underneath the caller, which makes stale reset tickets and stale
    /// old-password validations fail instead of clobbering the new credential.
    pub async fn set_password_hash_if(
        &self,
        id: i64,
        new_hash: &str,
        expected_hash: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1 AND password_hash = $3
            "#,
        )
        .bind(id)
        .bind(new_hash)
        .bind(expected_hash)
        .execute(&self.pool)
        .await
        .context("Failed to set password hash")?;

        Ok(result.rows_affected() == 1)
    }

}

fn is_unique_violation(err: &dyn sqlx::error::DatabaseError) -> bool {
    err.code().as_deref() == Some("23505")
}

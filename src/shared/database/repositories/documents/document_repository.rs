use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domains::documents::models::Document;

pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_document(row: &sqlx::postgres::PgRow) -> Document {
        Document {
            id: row.get("id"),
            title: row.get("title"),
            slug: row.get("slug"),
            description: row.get("description"),
            category: row.get("category"),
            created_by: row.get("created_by"),
            created_by_email: row.get("created_by_email"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    pub async fn create(
        &self,
        id: Uuid,
        title: &str,
        slug: &str,
        description: &str,
        category: &str,
        created_by: i64,
    ) -> Result<Document> {
        let row = sqlx::query(
            r#"
            WITH inserted AS (
                INSERT INTO documents (id, title, slug, description, category, created_by)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, title, slug, description, category, created_by, created_at, updated_at
            )
            SELECT i.*, u.email AS created_by_email
            FROM inserted i
            JOIN users u ON u.id = i.created_by
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(slug)
        .bind(description)
        .bind(category)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create document")?;

        Ok(Self::row_to_document(&row))
    }

    pub async fn list(&self) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT d.id, d.title, d.slug, d.description, d.category, d.created_by,
                   d.created_at, d.updated_at, u.email AS created_by_email
            FROM documents d
            JOIN users u ON u.id = d.created_by
            ORDER BY d.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list documents")?;

        Ok(rows.iter().map(Self::row_to_document).collect())
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Document>> {
        let row = sqlx::query(
            r#"
            SELECT d.id, d.title, d.slug, d.description, d.category, d.created_by,
                   d.created_at, d.updated_at, u.email AS created_by_email
            FROM documents d
            JOIN users u ON u.id = d.created_by
            WHERE d.slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch document by slug")?;

        Ok(row.map(|r| Self::row_to_document(&r)))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>> {
        let row = sqlx::query(
            r#"
            SELECT d.id, d.title, d.slug, d.description, d.category, d.created_by,
                   d.created_at, d.updated_at, u.email AS created_by_email
            FROM documents d
            JOIN users u ON u.id = d.created_by
            WHERE d.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch document by id")?;

        Ok(row.map(|r| Self::row_to_document(&r)))
    }

    /// True when some other document already uses `slug`.
    pub async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM documents
                WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2)
            ) AS present
            "#,
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check slug uniqueness")?;

        Ok(row.get("present"))
    }

    pub async fn update(
        &self,
        id: Uuid,
        title: &str,
        slug: &str,
        description: &str,
        category: &str,
    ) -> Result<Option<Document>> {
        let row = sqlx::query(
            r#"
            WITH updated AS (
                UPDATE documents
                SET title = $2, slug = $3, description = $4, category = $5, updated_at = NOW()
                WHERE id = $1
                RETURNING id, title, slug, description, category, created_by, created_at, updated_at
            )
            SELECT up.*, u.email AS created_by_email
            FROM updated up
            JOIN users u ON u.id = up.created_by
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(slug)
        .bind(description)
        .bind(category)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update document")?;

        Ok(row.map(|r| Self::row_to_document(&r)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to delete document")?;

        Ok(result.rows_affected() == 1)
    }
}

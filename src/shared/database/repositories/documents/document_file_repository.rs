use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domains::documents::models::DocumentFile;

pub struct DocumentFileRepository {
    pool: PgPool,
}

impl DocumentFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_file(row: &sqlx::postgres::PgRow) -> DocumentFile {
        DocumentFile {
            id: row.get("id"),
            document_id: row.get("document_id"),
            file_path: row.get("file_path"),
            original_name: row.get("original_name"),
            size_bytes: row.get("size_bytes"),
            uploaded_by: row.get("uploaded_by"),
            uploaded_at: row.get("uploaded_at"),
        }
    }

    pub async fn create(
        &self,
        id: Uuid,
        document_id: Uuid,
        file_path: &str,
        original_name: &str,
        size_bytes: i64,
        uploaded_by: i64,
    ) -> Result<DocumentFile> {
        let row = sqlx::query(
            r#"
            INSERT INTO document_files (id, document_id, file_path, original_name, size_bytes, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, document_id, file_path, original_name, size_bytes, uploaded_by, uploaded_at
            "#,
        )
        .bind(id)
        .bind(document_id)
        .bind(file_path)
        .bind(original_name)
        .bind(size_bytes)
        .bind(uploaded_by)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create document file")?;

        Ok(Self::row_to_file(&row))
    }

    pub async fn list(&self) -> Result<Vec<DocumentFile>> {
        let rows = sqlx::query(
            r#"
            SELECT id, document_id, file_path, original_name, size_bytes, uploaded_by, uploaded_at
            FROM document_files
            ORDER BY uploaded_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list document files")?;

        Ok(rows.iter().map(Self::row_to_file).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<DocumentFile>> {
        let row = sqlx::query(
            r#"
            SELECT id, document_id, file_path, original_name, size_bytes, uploaded_by, uploaded_at
            FROM document_files
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch document file")?;

        Ok(row.map(|r| Self::row_to_file(&r)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM document_files WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to delete document file")?;

        Ok(result.rows_affected() == 1)
    }
}

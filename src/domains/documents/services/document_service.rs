use axum::http::Method;
use uuid::Uuid;

use crate::domains::documents::models::{
    CreateDocumentRequest, Document, UpdateDocumentRequest,
};
use crate::shared::authz::check_object_permission;
use crate::shared::database::{Database, DocumentRepository};
use crate::shared::errors::{ApiError, FieldErrors};
use crate::shared::utils::slugify;

#[derive(Clone)]
pub struct DocumentService {
    db: Database,
}

impl DocumentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn repo(&self) -> DocumentRepository {
        DocumentRepository::new(self.db.pool().clone())
    }

    pub async fn list(&self) -> Result<Vec<Document>, ApiError> {
        self.repo().list().await.map_err(db_error)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Document, ApiError> {
        self.repo()
            .find_by_slug(slug)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ApiError::NotFound("Document not found".to_string()))
    }

    pub async fn create(
        &self,
        requester_id: i64,
        request: CreateDocumentRequest,
    ) -> Result<Document, ApiError> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(ApiError::Validation(FieldErrors::field(
                "title",
                "This field may not be blank.",
            )));
        }

        let repo = self.repo();
        let slug = self.unique_slug(&repo, &title, None).await?;

        repo.create(
            Uuid::new_v4(),
            &title,
            &slug,
            request.description.trim(),
            request.category.trim(),
            requester_id,
        )
        .await
        .map_err(db_error)
    }

    /// Partial update; only the owner may mutate. A title change regenerates
    /// the slug, so the document's URL moves with its name.
    pub async fn update(
        &self,
        slug: &str,
        requester_id: i64,
        request: UpdateDocumentRequest,
    ) -> Result<Document, ApiError> {
        let repo = self.repo();
        let existing = self.get_by_slug(slug).await?;
        check_object_permission(&Method::PATCH, existing.created_by, requester_id)?;

        let title = match request.title {
            Some(title) => {
                let title = title.trim().to_string();
                if title.is_empty() {
                    return Err(ApiError::Validation(FieldErrors::field(
                        "title",
                        "This field may not be blank.",
                    )));
                }
                title
            }
            None => existing.title.clone(),
        };

        let new_slug = if title == existing.title {
            existing.slug.clone()
        } else {
            self.unique_slug(&repo, &title, Some(existing.id)).await?
        };

        let description = request.description.unwrap_or(existing.description);
        let category = request.category.unwrap_or(existing.category);

        repo.update(existing.id, &title, &new_slug, description.trim(), category.trim())
            .await
            .map_err(db_error)?
            .ok_or_else(|| ApiError::NotFound("Document not found".to_string()))
    }

    pub async fn delete(&self, slug: &str, requester_id: i64) -> Result<(), ApiError> {
        let existing = self.get_by_slug(slug).await?;
        check_object_permission(&Method::DELETE, existing.created_by, requester_id)?;

        let deleted = self.repo().delete(existing.id).await.map_err(db_error)?;
        if !deleted {
            return Err(ApiError::NotFound("Document not found".to_string()));
        }
        Ok(())
    }

    /// Slug from the title, with a numeric suffix when taken: `report`,
    /// `report-1`, `report-2`, ...
    async fn unique_slug(
        &self,
        repo: &DocumentRepository,
        title: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<String, ApiError> {
        let base = slugify(title);
        let base = if base.is_empty() {
            "document".to_string()
        } else {
            base
        };

        if !repo.slug_exists(&base, exclude_id).await.map_err(db_error)? {
            return Ok(base);
        }

        let mut n = 1u32;
        loop {
            let candidate = format!("{base}-{n}");
            if !repo
                .slug_exists(&candidate, exclude_id)
                .await
                .map_err(db_error)?
            {
                return Ok(candidate);
            }
            n += 1;
        }
    }
}

fn db_error(e: anyhow::Error) -> ApiError {
    ApiError::Database(format!("{e:#}"))
}

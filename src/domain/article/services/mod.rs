// src/domain/article/services/mod.rs
use std::sync::Arc;

use crate::domain::article::repository::ArticleReadRepository;
use crate::domain::article::value_objects::{ArticleId, ArticleSlug};
use crate::domain::errors::{DomainError, DomainResult};

/// Domain service guarding slug uniqueness across live articles.
pub struct ArticleSlugService {
    read_repo: Arc<dyn ArticleReadRepository>,
}

impl ArticleSlugService {
    pub fn new(read_repo: Arc<dyn ArticleReadRepository>) -> Self {
        Self { read_repo }
    }

    /// Succeeds when `slug` is free, or when it already belongs to
    /// `owner` (an article being rewritten under its own slug).
    pub async fn ensure_available(
        &self,
        slug: &ArticleSlug,
        owner: Option<ArticleId>,
    ) -> DomainResult<()> {
        match self.read_repo.find_by_slug(slug).await? {
            Some(existing) if owner == Some(existing.id) => Ok(()),
            Some(_) => Err(DomainError::Conflict(format!(
                "an article with slug '{slug}' already exists"
            ))),
            None => Ok(()),
        }
    }
}

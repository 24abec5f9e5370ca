use crate::domain::article::entity::{Article, ArticleUpdate, NewArticle};
use crate::domain::article::value_objects::{ArticleId, ArticleSlug};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Mutations are atomic: a failed call leaves storage as it was.
#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    /// Store a new article and return it with its assigned id.
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    /// Fails with `DomainError::NotFound` when the id is unknown.
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;
    /// Fails with `DomainError::NotFound` when the id is unknown.
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>>;
    async fn list(&self) -> DomainResult<Vec<Article>>;
    /// Articles carrying every tag in `tags`. An empty filter matches all.
    async fn list_by_tags(&self, tags: &[String]) -> DomainResult<Vec<Article>>;
    /// Deduplicated union of all tags across stored articles.
    async fn list_tags(&self) -> DomainResult<Vec<String>>;
}

// tests/support/mocks.rs
use async_trait::async_trait;
use blog_core::application::ports::time::Clock;
use blog_core::domain::article::{
    Article, ArticleId, ArticleReadRepository, ArticleSlug, ArticleUpdate,
    ArticleWriteRepository, NewArticle,
};
use blog_core::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// テスト用の固定タイムスタンプ
static FIXED_NOW: Lazy<DateTime<Utc>> = Lazy::new(|| {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .expect("invalid RFC3339 in tests/support/mocks.rs")
        .with_timezone(&Utc)
});

pub fn fixed_now() -> DateTime<Utc> {
    *FIXED_NOW
}

#[derive(Default, Clone, Copy)]
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}

/// Storage that is permanently down. Every call fails with a persistence
/// error carrying `BROKEN_STORAGE_CAUSE`.
#[derive(Default, Clone, Copy)]
pub struct BrokenArticleRepo;

pub const BROKEN_STORAGE_CAUSE: &str = "connection refused (os error 111)";

fn broken<T>() -> DomainResult<T> {
    Err(DomainError::Persistence(BROKEN_STORAGE_CAUSE.into()))
}

#[async_trait]
impl ArticleWriteRepository for BrokenArticleRepo {
    async fn insert(&self, _article: NewArticle) -> DomainResult<Article> {
        broken()
    }

    async fn update(&self, _update: ArticleUpdate) -> DomainResult<Article> {
        broken()
    }

    async fn delete(&self, _id: ArticleId) -> DomainResult<()> {
        broken()
    }
}

#[async_trait]
impl ArticleReadRepository for BrokenArticleRepo {
    async fn find_by_id(&self, _id: ArticleId) -> DomainResult<Option<Article>> {
        broken()
    }

    async fn find_by_slug(&self, _slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        broken()
    }

    async fn list(&self) -> DomainResult<Vec<Article>> {
        broken()
    }

    async fn list_by_tags(&self, _tags: &[String]) -> DomainResult<Vec<Article>> {
        broken()
    }

    async fn list_tags(&self) -> DomainResult<Vec<String>> {
        broken()
    }
}

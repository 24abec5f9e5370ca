// src/infrastructure/repositories/memory_article.rs
use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{
    article::{
        Article, ArticleId, ArticleReadRepository, ArticleSlug, ArticleUpdate,
        ArticleWriteRepository, NewArticle,
    },
    errors::{DomainError, DomainResult},
};

#[derive(Debug)]
struct MemoryState {
    articles: BTreeMap<i64, Article>,
    next_id: i64,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            articles: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl MemoryState {
    fn slug_taken(&self, slug: &ArticleSlug, except: Option<ArticleId>) -> bool {
        self.articles
            .values()
            .any(|article| &article.slug == slug && Some(article.id) != except)
    }
}

/// Process-local article store. All state sits behind a single lock; reads
/// return clones so no guard ever escapes a method.
#[derive(Debug, Default)]
pub struct InMemoryArticleRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store. Ids continue after the largest seeded id.
    pub fn with_articles(articles: impl IntoIterator<Item = Article>) -> Self {
        let mut state = MemoryState::default();
        for article in articles {
            state.next_id = state.next_id.max(article.id.0 + 1);
            state.articles.insert(article.id.0, article);
        }
        Self {
            state: RwLock::new(state),
        }
    }

    pub fn len(&self) -> usize {
        self.state.read().articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticleRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut state = self.state.write();
        if state.slug_taken(&article.slug, None) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        let id = ArticleId::new(state.next_id)?;
        state.next_id += 1;

        let stored = article.into_article(id);
        state.articles.insert(id.0, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut state = self.state.write();
        if !state.articles.contains_key(&update.id.0) {
            return Err(DomainError::NotFound("article not found".into()));
        }
        if state.slug_taken(&update.slug, Some(update.id)) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        let article = state
            .articles
            .get_mut(&update.id.0)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        article.apply(update);
        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        self.state
            .write()
            .articles
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticleRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.state.read().articles.get(&id.0).cloned())
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let state = self.state.read();
        Ok(state
            .articles
            .values()
            .find(|article| &article.slug == slug)
            .cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Article>> {
        Ok(self.state.read().articles.values().cloned().collect())
    }

    async fn list_by_tags(&self, tags: &[String]) -> DomainResult<Vec<Article>> {
        let state = self.state.read();
        Ok(state
            .articles
            .values()
            .filter(|article| article.tags.contains_all(tags))
            .cloned()
            .collect())
    }

    async fn list_tags(&self) -> DomainResult<Vec<String>> {
        let state = self.state.read();
        let tags: BTreeSet<&String> = state
            .articles
            .values()
            .flat_map(|article| article.tags.iter())
            .collect();
        Ok(tags.into_iter().cloned().collect())
    }
}

// src/domain/article/entity.rs
use crate::domain::article::document::ArticleDocument;
use crate::domain::article::value_objects::{ArticleId, ArticleSlug, ArticleTags, ArticleTitle};
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub thumbnail: Option<String>,
    pub content: String,
    pub tags: ArticleTags,
    pub publication_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Replace every document-derived field. `id` and `created_at` survive.
    pub fn apply(&mut self, update: ArticleUpdate) {
        let ArticleUpdate {
            id: _,
            title,
            slug,
            thumbnail,
            content,
            tags,
            publication_date,
            updated_at,
        } = update;

        self.title = title;
        self.slug = slug;
        self.thumbnail = thumbnail;
        self.content = content;
        self.tags = tags;
        self.publication_date = publication_date;
        self.updated_at = updated_at;
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub thumbnail: Option<String>,
    pub content: String,
    pub tags: ArticleTags,
    pub publication_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewArticle {
    pub fn from_document(document: ArticleDocument, now: DateTime<Utc>) -> Self {
        let ArticleDocument {
            title,
            slug,
            thumbnail,
            content,
            tags,
            publication_date,
        } = document;

        Self {
            title,
            slug,
            thumbnail,
            content,
            tags,
            publication_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_article(self, id: ArticleId) -> Article {
        Article {
            id,
            title: self.title,
            slug: self.slug,
            thumbnail: self.thumbnail,
            content: self.content,
            tags: self.tags,
            publication_date: self.publication_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Full replacement of an existing article. Partial updates are not modelled.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub thumbnail: Option<String>,
    pub content: String,
    pub tags: ArticleTags,
    pub publication_date: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn from_document(id: ArticleId, document: ArticleDocument, now: DateTime<Utc>) -> Self {
        let ArticleDocument {
            title,
            slug,
            thumbnail,
            content,
            tags,
            publication_date,
        } = document;

        Self {
            id,
            title,
            slug,
            thumbnail,
            content,
            tags,
            publication_date,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_article() -> Article {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Article {
            id: ArticleId::new(1).unwrap(),
            title: ArticleTitle::new("title").unwrap(),
            slug: ArticleSlug::new("title").unwrap(),
            thumbnail: Some("thumb.png".into()),
            content: "body".into(),
            tags: ArticleTags::new(["a"]),
            publication_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn apply_replaces_document_fields_and_keeps_identity() {
        let mut article = sample_article();
        let created = article.created_at;
        let later = created + Duration::hours(3);

        article.apply(ArticleUpdate {
            id: ArticleId::new(99).unwrap(),
            title: ArticleTitle::new("New Title").unwrap(),
            slug: ArticleSlug::new("new-title").unwrap(),
            thumbnail: None,
            content: "new body".into(),
            tags: ArticleTags::new(["b", "c"]),
            publication_date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            updated_at: later,
        });

        assert_eq!(i64::from(article.id), 1);
        assert_eq!(article.title.as_str(), "New Title");
        assert_eq!(article.slug.as_str(), "new-title");
        assert!(article.thumbnail.is_none());
        assert_eq!(article.tags.as_slice(), ["b", "c"]);
        assert_eq!(article.created_at, created);
        assert_eq!(article.updated_at, later);
    }
}

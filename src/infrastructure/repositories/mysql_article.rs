// src/infrastructure/repositories/mysql_article.rs
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleId, ArticleReadRepository, ArticleSlug, ArticleTags, ArticleTitle,
    ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;
use sqlx::{FromRow, MySql, MySqlPool, Transaction, types::Json};

const ARTICLE_COLUMNS: &str =
    "id, title, slug, thumbnail, content, tags, publication_date, created_at, updated_at";

/// Tags are stored as a JSON array; MySQL has no native array type.
#[derive(Clone)]
pub struct MySqlArticleRepository {
    pool: MySqlPool,
}

impl MySqlArticleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_in_tx(
        tx: &mut Transaction<'static, MySql>,
        id: i64,
    ) -> DomainResult<Article> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?"
        ))
        .bind(id)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_sqlx)?;

        Article::try_from(row)
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    thumbnail: Option<String>,
    content: String,
    tags: Json<Vec<String>>,
    publication_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            slug: ArticleSlug::new(row.slug)?,
            thumbnail: row.thumbnail,
            content: row.content,
            tags: ArticleTags::from(row.tags.0),
            publication_date: row.publication_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_articles(rows: Vec<ArticleRow>) -> DomainResult<Vec<Article>> {
    rows.into_iter().map(Article::try_from).collect()
}

#[async_trait]
impl ArticleWriteRepository for MySqlArticleRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            slug,
            thumbnail,
            content,
            tags,
            publication_date,
            created_at,
            updated_at,
        } = article;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let result = sqlx::query(
            "INSERT INTO articles (title, slug, thumbnail, content, tags, publication_date, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(thumbnail)
        .bind(content)
        .bind(Json(tags.into_inner()))
        .bind(publication_date)
        .bind(created_at)
        .bind(updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| DomainError::Persistence("article id out of range".into()))?;
        let stored = Self::fetch_in_tx(&mut tx, id).await?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(stored)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            title,
            slug,
            thumbnail,
            content,
            tags,
            publication_date,
            updated_at,
        } = update;
        let id = i64::from(id);

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // MySQL reports changed rows, not matched rows, so existence is
        // checked up front under a row lock.
        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM articles WHERE id = ? FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if exists.is_none() {
            return Err(DomainError::NotFound("article not found".into()));
        }

        sqlx::query(
            "UPDATE articles
             SET title = ?, slug = ?, thumbnail = ?, content = ?, tags = ?,
                 publication_date = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(thumbnail)
        .bind(content)
        .bind(Json(tags.into_inner()))
        .bind(publication_date)
        .bind(updated_at)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let stored = Self::fetch_in_tx(&mut tx, id).await?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(stored)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }

        tx.commit().await.map_err(map_sqlx)
    }
}

#[async_trait]
impl ArticleReadRepository for MySqlArticleRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = ?"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        into_articles(rows)
    }

    async fn list_by_tags(&self, tags: &[String]) -> DomainResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE JSON_CONTAINS(tags, ?) ORDER BY id"
        ))
        .bind(Json(tags))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        into_articles(rows)
    }

    async fn list_tags(&self) -> DomainResult<Vec<String>> {
        // Arrays are decoded whole; tags have no length limit.
        let arrays = sqlx::query_scalar::<_, Json<Vec<String>>>("SELECT tags FROM articles")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(distinct_tags(arrays.into_iter().map(|Json(tags)| tags)))
    }
}

fn distinct_tags(arrays: impl IntoIterator<Item = Vec<String>>) -> Vec<String> {
    arrays
        .into_iter()
        .flatten()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_merged_sorted_and_kept_whole() {
        let long = "t".repeat(300);
        let arrays = vec![
            vec!["web".to_string(), long.clone()],
            vec!["rust".to_string(), "web".to_string()],
            Vec::new(),
        ];
        assert_eq!(distinct_tags(arrays), ["rust".to_string(), long, "web".to_string()]);
    }
}

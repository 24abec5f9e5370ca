use crate::domain::article::Article;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    /// Calendar date in `YYYY-MM-DD` form.
    #[schema(value_type = String, format = Date, example = "2005-04-02")]
    pub publication_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            slug: article.slug.into_inner(),
            thumbnail: article.thumbnail,
            content: article.content,
            tags: article.tags.into_inner(),
            publication_date: article.publication_date,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

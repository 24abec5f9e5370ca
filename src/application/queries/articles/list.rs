use super::ArticleQueryService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult},
    domain::article::{Article, SortOption, sort_articles},
};

#[derive(Debug, Default)]
pub struct ListArticlesQuery {
    pub sort: Option<SortOption>,
}

/// Articles carrying all of `tags` (AND semantics).
#[derive(Debug, Default)]
pub struct ListArticlesByTagsQuery {
    pub tags: Vec<String>,
    pub sort: Option<SortOption>,
}

impl ArticleQueryService {
    pub async fn list_articles(&self, query: ListArticlesQuery) -> ApplicationResult<Vec<ArticleDto>> {
        let records = self.read_repo.list().await?;
        Ok(into_sorted_dtos(records, query.sort))
    }

    pub async fn list_articles_by_tags(
        &self,
        query: ListArticlesByTagsQuery,
    ) -> ApplicationResult<Vec<ArticleDto>> {
        let records = self.read_repo.list_by_tags(&query.tags).await?;
        Ok(into_sorted_dtos(records, query.sort))
    }
}

fn into_sorted_dtos(mut records: Vec<Article>, sort: Option<SortOption>) -> Vec<ArticleDto> {
    if let Some(option) = sort {
        sort_articles(&mut records, option);
    }
    records.into_iter().map(Into::into).collect()
}

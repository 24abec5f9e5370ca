// src/presentation/http/controllers/pages.rs
use crate::application::{
    dto::ArticleDto,
    queries::articles::{GetArticleBySlugQuery, ListArticlesByTagsQuery, ListArticlesQuery},
};
use crate::domain::article::SortOption;
use crate::presentation::http::controllers::articles::ArticleListParams;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use crate::presentation::http::views::{
    ArticleCard, ArticlePage, BlogPage, IndexPage, NotFoundPage, TagGroup, render,
};
use axum::{
    Extension,
    extract::{Path, RawQuery},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

/// `/`: every article, optionally narrowed by `tag` and ordered by `sort`.
pub async fn blog(
    Extension(state): Extension<HttpState>,
    RawQuery(query): RawQuery,
) -> HttpResult<Response> {
    let params = ArticleListParams::from_query(query.as_deref())?;
    let sort = Some(params.sort_option());
    let queries = &state.services.article_queries;

    let articles = if params.tag.is_empty() {
        queries.list_articles(ListArticlesQuery { sort }).await
    } else {
        queries
            .list_articles_by_tags(ListArticlesByTagsQuery {
                tags: params.tag.clone(),
                sort,
            })
            .await
    }
    .into_http()?;

    let page = BlogPage {
        articles: articles.iter().map(ArticleCard::from).collect(),
        active_tags: params.tag,
    };
    Ok(render(&page)?.into_response())
}

/// `/index`: articles grouped under each tag, tags in alphabetical order.
pub async fn index(Extension(state): Extension<HttpState>) -> HttpResult<Response> {
    let queries = &state.services.article_queries;
    let tags = queries.list_tags().await.into_http()?;
    let articles = queries
        .list_articles(ListArticlesQuery {
            sort: Some(SortOption::PublicationDate),
        })
        .await
        .into_http()?;

    let page = IndexPage {
        groups: group_by_tag(tags, &articles),
    };
    Ok(render(&page)?.into_response())
}

fn group_by_tag(tags: Vec<String>, articles: &[ArticleDto]) -> Vec<TagGroup> {
    tags.into_iter()
        .map(|tag| {
            let articles = articles
                .iter()
                .filter(|article| article.tags.contains(&tag))
                .map(ArticleCard::from)
                .collect();
            TagGroup { tag, articles }
        })
        .collect()
}

pub async fn article(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
    uri: Uri,
) -> HttpResult<Response> {
    let result = state
        .services
        .article_queries
        .get_article_by_slug(GetArticleBySlugQuery { slug })
        .await;

    match result {
        Ok(article) => Ok(render(&ArticlePage::from(article))?.into_response()),
        Err(err) if err.is_not_found() => not_found(uri).await,
        Err(err) => Err(err).into_http(),
    }
}

pub async fn not_found(uri: Uri) -> HttpResult<Response> {
    let page = NotFoundPage {
        path: uri.path().to_string(),
    };
    Ok((StatusCode::NOT_FOUND, render(&page)?).into_response())
}

// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{CreateArticleCommand, DeleteArticleCommand, UpdateArticleCommand},
    dto::ArticleDto,
    queries::articles::{
        GetArticleByIdQuery, GetArticleBySlugQuery, ListArticlesByTagsQuery, ListArticlesQuery,
    },
};
use crate::domain::article::SortOption;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{
        Path, RawQuery,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Filters shared by the JSON listing and the HTML blog page. `tag` may be
/// repeated; all given tags must match.
#[derive(Debug, Default, Clone, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleListParams {
    /// Required tag; repeat for AND filtering.
    pub tag: Vec<String>,
    /// `title`, `id` or `date` (default). Other values keep storage order.
    pub sort: Option<String>,
}

impl ArticleListParams {
    pub fn from_query(raw: Option<&str>) -> HttpResult<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw.unwrap_or_default())
            .map_err(|err| HttpError::bad_request(format!("invalid query string: {err}")))?;

        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "tag" => {
                    let tag = value.trim();
                    if !tag.is_empty() {
                        params.tag.push(tag.to_string());
                    }
                }
                "sort" => params.sort = Some(value),
                _ => {}
            }
        }
        Ok(params)
    }

    pub fn sort_option(&self) -> SortOption {
        self.sort
            .as_deref()
            .map_or_else(SortOption::default, SortOption::parse)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ArticleRequest {
    /// Raw article document: headers, a `===` line, then the markdown body.
    #[schema(example = "title:Fondant recipe\npublicationDate:2005-04-02\ntags:cooking,sweets\n===\n# Markdown Title\nMarkdown contents...")]
    pub article: String,
}

fn json_body(payload: Result<Json<ArticleRequest>, JsonRejection>) -> HttpResult<ArticleRequest> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| HttpError::bad_request(rejection.body_text()))
}

#[utoipa::path(
    get,
    path = "/api/articles",
    params(ArticleListParams),
    responses(
        (status = 200, description = "Articles matching the filters.", body = [ArticleDto]),
        (status = 401, description = "Missing or invalid credentials.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("apiKey" = [])),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    RawQuery(query): RawQuery,
) -> HttpResult<Json<Vec<ArticleDto>>> {
    let params = ArticleListParams::from_query(query.as_deref())?;
    let sort = Some(params.sort_option());
    let queries = &state.services.article_queries;

    let articles = if params.tag.is_empty() {
        queries.list_articles(ListArticlesQuery { sort }).await
    } else {
        queries
            .list_articles_by_tags(ListArticlesByTagsQuery {
                tags: params.tag,
                sort,
            })
            .await
    }
    .into_http()?;

    Ok(Json(articles))
}

#[utoipa::path(
    get,
    path = "/api/articles/title/{slug}",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "The article.", body = ArticleDto),
        (status = 404, description = "No article with this slug.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("apiKey" = [])),
    tag = "Articles"
)]
pub async fn get_article_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article_by_slug(GetArticleBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/articles/id/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "The article.", body = ArticleDto),
        (status = 400, description = "Malformed id.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No article with this id.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("apiKey" = [])),
    tag = "Articles"
)]
pub async fn get_article_by_id(
    Extension(state): Extension<HttpState>,
    id: Result<Path<i64>, PathRejection>,
) -> HttpResult<Json<ArticleDto>> {
    let Path(id) = id.map_err(|_| HttpError::bad_request("invalid article id"))?;

    state
        .services
        .article_queries
        .get_article_by_id(GetArticleByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/articles",
    request_body = ArticleRequest,
    responses(
        (status = 201, description = "Article created.", body = ArticleDto),
        (status = 400, description = "Malformed document.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("apiKey" = [])),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let request = json_body(payload)?;

    let created = state
        .services
        .article_commands
        .create_article(CreateArticleCommand {
            document: request.article,
        })
        .await
        .into_http()?;

    state.cache.clear();
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/articles/{slug}",
    params(("slug" = String, Path, description = "Slug of the article to replace")),
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Article replaced.", body = ArticleDto),
        (status = 400, description = "Malformed document.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No article with this slug.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "New title collides with another article.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("apiKey" = [])),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> HttpResult<Json<ArticleDto>> {
    let request = json_body(payload)?;

    let updated = state
        .services
        .article_commands
        .update_article(UpdateArticleCommand {
            slug,
            document: request.article,
        })
        .await
        .into_http()?;

    state.cache.clear();
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/articles/{slug}",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 204, description = "Article deleted."),
        (status = 404, description = "No article with this slug.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("apiKey" = [])),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<StatusCode> {
    state
        .services
        .article_commands
        .delete_article(DeleteArticleCommand { slug })
        .await
        .into_http()?;

    state.cache.clear();
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_repeated_tags_and_sort() {
        let params = ArticleListParams::from_query(Some("tag=tag1&tag=tag2&sort=title")).unwrap();
        assert_eq!(params.tag, ["tag1", "tag2"]);
        assert_eq!(params.sort_option(), SortOption::Title);
    }

    #[test]
    fn missing_sort_defaults_to_date_and_unknown_is_unordered() {
        let params = ArticleListParams::from_query(None).unwrap();
        assert!(params.tag.is_empty());
        assert_eq!(params.sort_option(), SortOption::PublicationDate);

        let params = ArticleListParams::from_query(Some("sort=popularity")).unwrap();
        assert_eq!(params.sort_option(), SortOption::Unordered);
    }

    #[test]
    fn blank_tags_are_ignored_and_values_are_decoded() {
        let params = ArticleListParams::from_query(Some("tag=&tag=web%20dev&page=2")).unwrap();
        assert_eq!(params.tag, ["web dev"]);
    }
}

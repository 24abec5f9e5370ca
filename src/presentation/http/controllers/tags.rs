use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};

#[utoipa::path(
    get,
    path = "/api/tags",
    responses(
        (status = 200, description = "Every tag in use, deduplicated.", body = [String])
    ),
    security(("apiKey" = [])),
    tag = "Articles"
)]
pub async fn list_tags(Extension(state): Extension<HttpState>) -> HttpResult<Json<Vec<String>>> {
    state
        .services
        .article_queries
        .list_tags()
        .await
        .into_http()
        .map(Json)
}

// src/presentation/http/routes.rs
use crate::presentation::http::controllers::{articles, pages, session, tags};
use crate::presentation::http::middleware::{auth::require_api_access, cache::cache_responses};
use crate::presentation::http::openapi::{self, StatusResponse};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json, Router,
    http::{HeaderName, HeaderValue, Method, Request},
    middleware::from_fn,
    routing::get,
};
use std::{path::PathBuf, time::Duration};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Router-level settings that are not part of the per-request state.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub assets_dir: PathBuf,
    pub allowed_origins: Vec<String>,
    pub api_key_header: HeaderName,
}

pub fn build_router(state: HttpState, options: &RouterOptions) -> Router {
    let api = Router::new()
        .route(
            "/api/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/api/articles/title/{slug}",
            get(articles::get_article_by_slug),
        )
        .route("/api/articles/id/{id}", get(articles::get_article_by_id))
        .route(
            "/api/articles/{slug}",
            axum::routing::put(articles::update_article).delete(articles::delete_article),
        )
        .route("/api/tags", get(tags::list_tags))
        .route(
            "/api/session",
            axum::routing::post(session::open_session).delete(session::close_session),
        )
        .route_layer(from_fn(require_api_access));

    let pages = Router::new()
        .route("/", get(pages::blog))
        .route("/index", get(pages::index))
        .route("/article/{slug}", get(pages::article))
        .route_layer(from_fn(cache_responses));

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<axum::body::Body>| {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    Router::new()
        .merge(api)
        .merge(pages)
        .route("/health", get(health))
        .route(openapi::OPENAPI_PATH, get(openapi::serve_openapi))
        .nest_service("/static", ServeDir::new(&options.assets_dir))
        .fallback(pages::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(trace)
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(cors_layer(options))
                .layer(CompressionLayer::new()),
        )
        .layer(Extension(state))
}

fn cors_layer(options: &RouterOptions) -> CorsLayer {
    let origins: Vec<HeaderValue> = options
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            options.api_key_header.clone(),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}

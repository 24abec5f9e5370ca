// tests/support/helpers.rs
use super::mocks::{BrokenArticleRepo, FixedClock};
use axum::Router;
use axum::body::{self, Body};
use axum::http::{HeaderName, Request, StatusCode, header::CONTENT_TYPE};
use axum::response::Response;
use blog_core::application::ports::{session::SessionStore, time::Clock, util::SlugGenerator};
use blog_core::application::services::ApplicationServices;
use blog_core::domain::article::{ArticleReadRepository, ArticleWriteRepository};
use blog_core::infrastructure::{
    repositories::InMemoryArticleRepository, security::session_store::InMemorySessionStore,
    util::NaiveSlugGenerator,
};
use blog_core::presentation::http::{
    middleware::{auth::AccessPolicy, cache::ResponseCache},
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt as _;

pub const TEST_API_KEY: &str = "test-key";
pub const API_KEY_HEADER: &str = "x-api-key";
pub const SESSION_COOKIE: &str = "blog_session";

pub fn build_services(
    write: Arc<dyn ArticleWriteRepository>,
    read: Arc<dyn ArticleReadRepository>,
) -> Arc<ApplicationServices> {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(NaiveSlugGenerator);
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(
        chrono::Duration::hours(1),
        Arc::clone(&clock),
    ));
    Arc::new(ApplicationServices::new(write, read, sessions, clock, slugger))
}

pub fn memory_services() -> Arc<ApplicationServices> {
    let repo = Arc::new(InMemoryArticleRepository::new());
    build_services(repo.clone(), repo)
}

fn router_for(services: Arc<ApplicationServices>, cache_ttl: Duration) -> Router {
    let state = HttpState {
        services,
        access: Arc::new(AccessPolicy::new(
            [TEST_API_KEY.to_string()],
            HeaderName::from_static(API_KEY_HEADER),
            SESSION_COOKIE,
            Duration::from_secs(3600),
        )),
        cache: Arc::new(ResponseCache::new(cache_ttl)),
    };
    let options = RouterOptions {
        assets_dir: std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
        allowed_origins: vec!["http://localhost:3000".into()],
        api_key_header: HeaderName::from_static(API_KEY_HEADER),
    };
    build_router(state, &options)
}

/// Router over an empty in-memory store, HTML cache disabled.
pub fn make_test_router() -> Router {
    router_for(memory_services(), Duration::ZERO)
}

pub fn make_cached_test_router() -> Router {
    router_for(memory_services(), Duration::from_secs(60))
}

/// Router whose storage fails every call.
pub fn make_broken_router() -> Router {
    let repo = Arc::new(BrokenArticleRepo);
    router_for(build_services(repo.clone(), repo), Duration::ZERO)
}

pub fn api_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(API_KEY_HEADER, TEST_API_KEY);
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(resp: Response) -> Vec<u8> {
    body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub async fn json_body(resp: Response) -> Value {
    let bytes = body_bytes(resp).await;
    serde_json::from_slice(&bytes).expect("expected a JSON body")
}

pub async fn text_body(resp: Response) -> String {
    String::from_utf8(body_bytes(resp).await).expect("expected UTF-8 body")
}

/// Create an article through the API and return the stored JSON.
pub async fn create_via_api(app: &Router, document: &str) -> Value {
    let resp = send(
        app,
        api_request(
            "POST",
            "/api/articles",
            Some(serde_json::json!({ "article": document })),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED, "create failed");
    json_body(resp).await
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) -> Value {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json = json_body(resp).await;
    assert_eq!(json["error"], expected_error, "unexpected error field: {json}");
    assert!(
        json["message"].as_str().is_some_and(|m| !m.is_empty()),
        "expected non-empty message field in ErrorResponse"
    );
    json
}

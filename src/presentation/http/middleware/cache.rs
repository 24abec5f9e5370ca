// src/presentation/http/middleware/cache.rs
use crate::presentation::http::error::HttpError;
use crate::presentation::http::state::HttpState;
use axum::{
    body::{Body, to_bytes},
    http::{HeaderValue, Method, Request, StatusCode, Uri, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

pub const CACHE_STATUS_HEADER: &str = "x-cache";
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

#[derive(Debug, Clone)]
pub struct CachedResponse {
    status: StatusCode,
    content_type: Option<HeaderValue>,
    body: Bytes,
    stored_at: Instant,
}

impl CachedResponse {
    fn replay(self, cache_status: &'static str) -> Response {
        let mut response = (self.status, self.body).into_response();
        let headers = response.headers_mut();
        match self.content_type {
            Some(content_type) => {
                headers.insert(CONTENT_TYPE, content_type);
            }
            None => {
                headers.remove(CONTENT_TYPE);
            }
        }
        headers.insert(CACHE_STATUS_HEADER, HeaderValue::from_static(cache_status));
        response
    }
}

/// TTL map of rendered GET responses keyed by path and query. A zero TTL
/// disables caching entirely. Holds at most `max_entries` responses; when
/// full, expired entries go first and then the oldest one.
#[derive(Debug)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CachedResponse>>,
    ttl: Duration,
    max_entries: usize,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_max_entries(ttl, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn get(&self, key: &str) -> Option<CachedResponse> {
        let entry = self.entries.read().get(key).cloned()?;
        if entry.stored_at.elapsed() <= self.ttl {
            return Some(entry);
        }
        self.entries.write().remove(key);
        None
    }

    pub fn insert(
        &self,
        key: String,
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    ) {
        let entry = CachedResponse {
            status,
            content_type,
            body,
            stored_at: Instant::now(),
        };
        let ttl = self.ttl;
        let mut entries = self.entries.write();
        if !entries.contains_key(&key) && entries.len() >= self.max_entries {
            entries.retain(|_, cached| cached.stored_at.elapsed() <= ttl);
            if entries.len() >= self.max_entries {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, cached)| cached.stored_at)
                    .map(|(key, _)| key.clone());
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                }
            }
        }
        entries.insert(key, entry);
    }

    /// Forget every entry, e.g. after articles were written.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn cache_key(uri: &Uri) -> String {
    uri.path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string)
}

/// Replay cached GET responses; store fresh ones. Server errors are never
/// cached, and other methods pass straight through.
pub async fn cache_responses(req: Request<Body>, next: Next) -> Response {
    let Some(cache) = req
        .extensions()
        .get::<HttpState>()
        .map(|state| state.cache.clone())
    else {
        return next.run(req).await;
    };

    if req.method() != Method::GET || !cache.is_enabled() {
        return next.run(req).await;
    }

    let key = cache_key(req.uri());
    if let Some(hit) = cache.get(&key) {
        tracing::debug!(%key, "response cache hit");
        return hit.replay("hit");
    }

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();
    let body = match to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(err) => {
            return HttpError::internal(format!("failed to buffer response: {err}"))
                .into_response();
        }
    };

    if !parts.status.is_server_error() {
        cache.insert(
            key,
            parts.status,
            parts.headers.get(CONTENT_TYPE).cloned(),
            body.clone(),
        );
    }

    let mut response = Response::from_parts(parts, Body::from(body));
    response
        .headers_mut()
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("miss"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html() -> Option<HeaderValue> {
        Some(HeaderValue::from_static("text/html; charset=utf-8"))
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("/".into(), StatusCode::OK, html(), Bytes::from_static(b"<p>hi</p>"));

        tokio::time::advance(Duration::from_secs(30)).await;
        let hit = cache.get("/").unwrap();
        assert_eq!(hit.status, StatusCode::OK);
        assert_eq!(hit.body, Bytes::from_static(b"<p>hi</p>"));

        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(cache.get("/").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_ttl_disables_the_cache() {
        assert!(!ResponseCache::new(Duration::ZERO).is_enabled());
        assert!(ResponseCache::new(Duration::from_secs(1)).is_enabled());
    }

    #[test]
    fn keys_include_the_query_string() {
        let uri: Uri = "/?tag=rust&sort=title".parse().unwrap();
        assert_eq!(cache_key(&uri), "/?tag=rust&sort=title");
        let bare: Uri = "/index".parse().unwrap();
        assert_eq!(cache_key(&bare), "/index");
    }

    #[tokio::test]
    async fn replayed_response_keeps_status_and_content_type() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert(
            "/article/missing".into(),
            StatusCode::NOT_FOUND,
            html(),
            Bytes::from_static(b"gone"),
        );

        let response = cache.get("/article/missing").unwrap().replay("hit");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(response.headers()[CACHE_STATUS_HEADER], "hit");
    }

    #[tokio::test(start_paused = true)]
    async fn distinct_query_strings_cannot_grow_the_cache_unbounded() {
        let cache = ResponseCache::with_max_entries(Duration::from_secs(60), 100);
        for i in 0..10_000 {
            cache.insert(format!("/?junk={i}"), StatusCode::OK, html(), Bytes::new());
            tokio::time::advance(Duration::from_millis(1)).await;
        }
        assert_eq!(cache.len(), 100);
        assert!(cache.get("/?junk=9999").is_some());
        assert!(cache.get("/?junk=0").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn a_full_cache_drops_expired_entries_before_live_ones() {
        let cache = ResponseCache::with_max_entries(Duration::from_secs(60), 3);
        cache.insert("/old-a".into(), StatusCode::OK, html(), Bytes::new());
        cache.insert("/old-b".into(), StatusCode::OK, html(), Bytes::new());

        tokio::time::advance(Duration::from_secs(61)).await;
        cache.insert("/fresh".into(), StatusCode::OK, html(), Bytes::new());
        cache.insert("/newest".into(), StatusCode::OK, html(), Bytes::new());

        assert_eq!(cache.len(), 2);
        assert!(cache.get("/fresh").is_some());
        assert!(cache.get("/newest").is_some());
    }
}

// src/presentation/http/middleware/auth.rs
use crate::presentation::http::error::HttpError;
use crate::presentation::http::state::HttpState;
use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use headers::{Cookie, HeaderMapExt};
use std::collections::HashSet;
use std::time::Duration;

/// Who may call the `/api` surface: holders of a configured API key, or
/// browsers carrying a live session cookie.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    api_keys: HashSet<String>,
    api_key_header: HeaderName,
    session_cookie: String,
    session_ttl: Duration,
}

impl AccessPolicy {
    pub fn new(
        api_keys: impl IntoIterator<Item = String>,
        api_key_header: HeaderName,
        session_cookie: impl Into<String>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            api_keys: api_keys.into_iter().collect(),
            api_key_header,
            session_cookie: session_cookie.into(),
            session_ttl,
        }
    }

    pub fn api_key_header(&self) -> &HeaderName {
        &self.api_key_header
    }

    pub fn is_valid_key(&self, key: &str) -> bool {
        self.api_keys.contains(key)
    }

    /// Session id carried in the configured cookie, if any.
    pub fn session_id(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .typed_get::<Cookie>()
            .and_then(|cookie| cookie.get(&self.session_cookie).map(str::to_owned))
    }

    /// `Set-Cookie` value that installs `session_id`.
    pub fn session_cookie(&self, session_id: &str) -> String {
        format!(
            "{}={session_id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.session_cookie,
            self.session_ttl.as_secs()
        )
    }

    /// `Set-Cookie` value that clears the session cookie.
    pub fn expired_session_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.session_cookie
        )
    }
}

/// Admit the request when it carries a valid API key or an authenticated
/// session cookie. A present but wrong key is rejected even if a session
/// cookie is also sent.
pub async fn require_api_access(req: Request<Body>, next: Next) -> Response {
    let Some(state) = req.extensions().get::<HttpState>().cloned() else {
        return HttpError::internal("application state missing").into_response();
    };
    let policy = &state.access;

    if let Some(value) = req.headers().get(policy.api_key_header()) {
        let valid = value
            .to_str()
            .is_ok_and(|key| policy.is_valid_key(key));
        if !valid {
            tracing::debug!("rejected request with invalid API key");
            return HttpError::unauthorized("invalid API key").into_response();
        }
        return next.run(req).await;
    }

    if let Some(session_id) = policy.session_id(req.headers()) {
        return match state
            .services
            .session_store()
            .is_authenticated(&session_id)
            .await
        {
            Ok(true) => next.run(req).await,
            Ok(false) => HttpError::unauthorized("invalid or expired session").into_response(),
            Err(err) => HttpError::from_error(err).into_response(),
        };
    }

    HttpError::unauthorized("missing API key").into_response()
}

// src/presentation/http/controllers/session.rs
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension,
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};

fn set_cookie(value: &str) -> HttpResult<[(axum::http::HeaderName, HeaderValue); 1]> {
    let value = HeaderValue::from_str(value)
        .map_err(|err| HttpError::internal(format!("invalid session cookie: {err}")))?;
    Ok([(SET_COOKIE, value)])
}

/// Trade an admitted request (normally one carrying an API key) for a
/// browser session cookie.
#[utoipa::path(
    post,
    path = "/api/session",
    responses(
        (status = 204, description = "Session opened; the cookie is in `Set-Cookie`."),
        (status = 401, description = "Missing or invalid credentials.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("apiKey" = [])),
    tag = "Session"
)]
pub async fn open_session(Extension(state): Extension<HttpState>) -> HttpResult<Response> {
    let session_id = state.services.session_store().open().await.into_http()?;
    let cookie = set_cookie(&state.access.session_cookie(&session_id))?;

    Ok((StatusCode::NO_CONTENT, cookie).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/session",
    responses(
        (status = 204, description = "Session revoked and cookie cleared.")
    ),
    security(("apiKey" = [])),
    tag = "Session"
)]
pub async fn close_session(
    Extension(state): Extension<HttpState>,
    headers: HeaderMap,
) -> HttpResult<Response> {
    if let Some(session_id) = state.access.session_id(&headers) {
        state
            .services
            .session_store()
            .revoke(&session_id)
            .await
            .into_http()?;
    }
    let cookie = set_cookie(&state.access.expired_session_cookie())?;

    Ok((StatusCode::NO_CONTENT, cookie).into_response())
}

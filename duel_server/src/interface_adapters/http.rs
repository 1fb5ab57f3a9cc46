// HTTP handlers for the page, the small JSON API and shared response headers.

use crate::interface_adapters::state::AppState;
use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

const NOT_FOUND_HTML: &str = "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<title>Not found</title></head><body><h1>Not found</h1>\
<p><a href=\"/\">Back to the duel</a></p></body></html>";

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'self' 'unsafe-inline'; \
style-src 'self' 'unsafe-inline'; connect-src 'self'; img-src 'self' data:; \
object-src 'none'; base-uri 'self'; frame-ancestors 'none'";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    // Machine-readable error code for consistent JSON error responses.
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: String,
}

pub async fn index() -> Response {
    no_store(Html(INDEX_HTML).into_response())
}

pub async fn health() -> Response {
    no_store(Json(HealthResponse { ok: true }).into_response())
}

pub async fn meta(State(state): State<Arc<AppState>>) -> Response {
    let body = MetaResponse {
        ok: true,
        service: state.service.name,
        version: state.service.version.clone(),
    };
    no_store(Json(body).into_response())
}

/// API paths get the JSON error schema; anything else gets a small page.
pub async fn not_found(uri: Uri) -> Response {
    let path = uri.path();
    if path == "/api" || path.starts_with("/api/") {
        let body = ErrorResponse {
            ok: false,
            error: "not_found".to_string(),
        };
        return no_store((StatusCode::NOT_FOUND, Json(body)).into_response());
    }

    (StatusCode::NOT_FOUND, Html(NOT_FOUND_HTML)).into_response()
}

/// Adds the security headers every response carries.
pub async fn security_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        "cross-origin-opener-policy",
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        "cross-origin-resource-policy",
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        "permissions-policy",
        HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );
    response
}

fn no_store(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

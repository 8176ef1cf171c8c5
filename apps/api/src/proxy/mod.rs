//! Proxy functions: request forwarders that attach server-held credentials.
//!
//! Both answer every request, pre-flight included, with permissive
//! cross-origin headers. Failures use the `{"error": message}` envelope.

pub mod ai_service;
pub mod airtable;

use axum::{
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{any, post},
    Json, Router,
};
use serde_json::json;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::state::AppState;

const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Routes mounted under `/functions/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/ai-service",
            post(ai_service::handle_ai_service).options(preflight),
        )
        .route("/airtable-proxy", any(airtable::handle_airtable_root))
        .route("/airtable-proxy/*path", any(airtable::handle_airtable_proxy))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
}

pub async fn preflight() -> &'static str {
    "ok"
}

pub fn proxy_error(status: StatusCode, message: impl std::fmt::Display) -> Response {
    let message = message.to_string();
    tracing::error!("Proxy error ({status}): {message}");
    (status, Json(json!({ "error": message }))).into_response()
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

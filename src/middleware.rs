//! Cross-origin policy: a guard that blocks foreign origins and the CORS headers for the allowed one.

use crate::config::AppConfig;
use axum::{
    extract::{Request, State},
    http::{
        header::{CONTENT_TYPE, ORIGIN},
        HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub const CORS_REJECTION: &str = "CORS error - this origin is not allowed";

/// Admit only requests whose `Origin` equals the configured client URL.
/// With no client URL configured, only requests without an `Origin` are admitted.
pub async fn origin_guard(State(config): State<Arc<AppConfig>>, req: Request, next: Next) -> Response {
    let origin = req
        .headers()
        .get(ORIGIN)
        .map(|v| v.to_str().unwrap_or_default().to_string());
    let allowed = match (origin.as_deref(), config.client_url.as_deref()) {
        (None, None) => true,
        (Some(origin), Some(client)) => origin == client,
        _ => false,
    };
    if !allowed {
        tracing::info!(origin = ?origin, "Block connection from");
        return (StatusCode::FORBIDDEN, CORS_REJECTION).into_response();
    }
    tracing::debug!(origin = ?origin, "Allow connection from");
    next.run(req).await
}

/// CORS response headers and preflight answers for the configured client URL.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);
    match config.client_url.as_deref().and_then(|url| HeaderValue::from_str(url).ok()) {
        Some(origin) => cors.allow_origin(origin),
        None => cors,
    }
}

//! Route tables and the assembled application router.

pub mod common;
pub mod products;

pub use common::common_routes;
pub use products::product_routes;

use crate::middleware::{cors_layer, origin_guard};
use crate::openapi::docs_routes;
use crate::state::AppState;
use axum::{middleware::from_fn_with_state, Router};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application: request tracing, origin guard, CORS, body limit, then `/`, `/docs` and `/products`.
pub fn app_router(state: AppState) -> Router {
    let config = state.config.clone();
    Router::new()
        .merge(common_routes())
        .merge(docs_routes())
        .merge(product_routes())
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.server.body_limit))
        .layer(cors_layer(&config))
        .layer(from_fn_with_state(config, origin_guard))
        .layer(TraceLayer::new_for_http())
}

//! HTTP gateway (Axum) over the analyzer.
//!
//! This module is primarily used by the `esg-lens` server binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{USER_ID_HEADER, esg_handler, history_handler};
pub use state::HandlerState;

use crate::cache::CacheStats;

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/v1/esg", get(esg_handler))
        .route("/v1/history", get(history_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache_entries: usize,
    pub cache_capacity: usize,
    pub cache_stats: CacheStats,
}

#[tracing::instrument(skip(state))]
pub async fn health_handler(State(state): State<HandlerState>) -> Response {
    let cache = state.analyzer.cache();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            cache_entries: cache.len(),
            cache_capacity: cache.capacity(),
            cache_stats: cache.stats(),
        }),
    )
        .into_response()
}

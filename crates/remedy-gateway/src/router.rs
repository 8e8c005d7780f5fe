//! Axum router wiring.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport::http};

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.cfg().gateway.max_body_bytes;

    Router::new()
        .route("/v1/decision", post(http::decide))
        .route("/api/decision", post(http::decide_demo))
        .route("/api/status", get(http::status))
        .route("/api/demo/scenarios", get(http::scenarios))
        .route("/api/demo/validate", get(http::validate))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

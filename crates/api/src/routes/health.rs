//! Health check route.

use axum::{Json, Router, routing::get};
use serde_json::json;

use crate::AppState;

/// Creates the health router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health - Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "sprout-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

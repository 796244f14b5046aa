//! Service status API.

use axum::{response::IntoResponse, Json};

/// Liveness check.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

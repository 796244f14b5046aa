//! `/api/slides`: the slide list as JSON.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::super::AppState;
use crate::slides::slides_or_default;

/// Serve the slide list.
///
/// Routed for every method; CORS headers are added by the router. Never
/// fails on a GET: any trouble upstream yields the built-in slides.
pub async fn slides(State(state): State<AppState>, method: Method) -> Response {
    match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::GET => Json(slides_or_default(state.source.as_ref()).await).into_response(),
        other => {
            tracing::debug!("Rejecting {} /api/slides", other);
            (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(serde_json::json!({ "error": "Method not allowed" })),
            )
                .into_response()
        }
    }
}

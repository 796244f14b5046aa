//! Static asset handlers.

use axum::{http::header, response::IntoResponse};

use super::super::assets;

/// Serve the carousel stylesheet.
pub async fn serve_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], assets::CSS)
}

/// Serve the carousel script.
pub async fn serve_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        assets::JS,
    )
}

//! Router configuration for the web server.

use axum::{
    http::{header, HeaderName, HeaderValue},
    routing::{any, get, MethodRouter},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use super::handlers;
use super::AppState;

/// Headers sent on every `/api/slides` response, whatever the method.
const SLIDES_API_CORS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"),
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET,OPTIONS"),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, \
         Content-MD5, Content-Type, Date, X-Api-Version",
    ),
];

fn with_cors(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    SLIDES_API_CORS.iter().fold(route, |route, (name, value)| {
        route.layer(SetResponseHeaderLayer::overriding(
            name.clone(),
            HeaderValue::from_static(*value),
        ))
    })
}

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::carousel_page))
        .route("/api/slides", with_cors(any(handlers::slides)))
        .route("/health", get(handlers::health))
        // Static assets (CSS/JS)
        .route("/static/carousel.css", get(handlers::serve_css))
        .route("/static/carousel.js", get(handlers::serve_js))
        .with_state(state)
}

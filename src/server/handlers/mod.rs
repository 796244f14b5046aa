//! HTTP request handlers for the web server.

mod api;
mod pages;
mod slides_api;
mod static_files;

// Re-export handlers for use by the router
pub use api::health;
pub use pages::carousel_page;
pub use slides_api::slides;
pub use static_files::{serve_css, serve_js};

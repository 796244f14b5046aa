//! Web server for the carousel.
//!
//! Serves the slide list at `/api/slides`, the carousel page at `/` and its
//! static assets.

mod assets;
mod handlers;
mod routes;
mod template_structs;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::slides::{NotionSlideSource, SlideSource};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub source: Arc<dyn SlideSource>,
}

impl AppState {
    /// State backed by the Notion database from `settings`.
    pub fn new(settings: Settings) -> Self {
        let source = Arc::new(NotionSlideSource::new(settings.notion.clone()));
        Self::with_source(settings, source)
    }

    pub fn with_source(settings: Settings, source: Arc<dyn SlideSource>) -> Self {
        Self {
            settings: Arc::new(settings),
            source,
        }
    }
}

/// Start the web server; returns after Ctrl+C.
pub async fn serve(settings: Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

//! Clients for the slide service endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL};
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::models::Slide;
use crate::notion::USER_AGENT;
use crate::slides::{slides_or_default, SlideSource};

/// Path of the slide endpoint relative to the server root.
pub const SLIDES_PATH: &str = "api/slides";

/// Errors from fetching slides over HTTP.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("Invalid slide payload: {0}")]
    Decode(String),
    #[error("Invalid server URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Where a carousel gets its slides from.
#[async_trait]
pub trait SlideService: Send + Sync {
    async fn fetch_slides(&self) -> Result<Vec<Slide>, ServiceError>;
}

/// Slide service reached over HTTP (`GET {base}/api/slides`).
pub struct HttpSlideService {
    client: Client,
    endpoint: Url,
}

impl HttpSlideService {
    /// Build a client for the server at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let invalid = |reason: String| ServiceError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };
        let mut base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(SLIDES_PATH).map_err(|e| invalid(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SlideService for HttpSlideService {
    async fn fetch_slides(&self) -> Result<Vec<Slide>, ServiceError> {
        let resp = self.client.get(self.endpoint.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!("Slide API error ({}): {}", status, body);
            return Err(ServiceError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

/// Slide service answered in-process by a [`SlideSource`].
///
/// Used when the web server renders the carousel itself: same guarantees as
/// the HTTP endpoint without the round trip.
pub struct LocalSlideService {
    source: Arc<dyn SlideSource>,
}

impl LocalSlideService {
    pub fn new(source: Arc<dyn SlideSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl SlideService for LocalSlideService {
    async fn fetch_slides(&self) -> Result<Vec<Slide>, ServiceError> {
        Ok(slides_or_default(self.source.as_ref()).await)
    }
}

//! Notion client errors.

use thiserror::Error;

/// Errors that can occur while talking to the Notion API.
#[derive(Debug, Error)]
pub enum NotionError {
    /// Transport failure (DNS, TLS, timeout, connection reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Notion answered with a non-2xx status.
    #[error("Notion API error ({status} {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
    /// The client could not be built from the given settings.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl NotionError {
    /// Whether Notion rejected the credentials or the integration lacks access.
    pub fn is_permission_error(&self) -> bool {
        matches!(self, NotionError::Api { status: 401 | 403 | 404, .. })
    }
}

//! reqwest-backed Notion API client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::error::NotionError;
use super::types::{Block, DatabaseQuery, ErrorBody, PaginatedList, Page};
use super::NotionApi;
use crate::config::NotionSettings;

/// User agent sent with every Notion request.
pub const USER_AGENT: &str = concat!("glideshow/", env!("CARGO_PKG_VERSION"));

const NOTION_VERSION_HEADER: HeaderName = HeaderName::from_static("notion-version");

/// Largest page size Notion accepts for block listings.
const BLOCK_PAGE_SIZE: &str = "100";

/// Notion API client bound to one integration token.
#[derive(Clone)]
pub struct NotionClient {
    client: Client,
    base: Url,
}

impl NotionClient {
    /// Create a client for the configured API base using `api_key`.
    pub fn new(settings: &NotionSettings, api_key: &str) -> Result<Self, NotionError> {
        let mut base = Url::parse(&settings.api_base).map_err(|e| {
            NotionError::InvalidConfig(format!("api base {:?}: {}", settings.api_base, e))
        })?;
        // Url::join drops the last path segment unless it ends with a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
            NotionError::InvalidConfig("API key contains invalid header characters".to_string())
        })?;
        auth.set_sensitive(true);
        let version = HeaderValue::from_str(&settings.api_version).map_err(|_| {
            NotionError::InvalidConfig(format!("api version {:?}", settings.api_version))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(NOTION_VERSION_HEADER, version);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.request_timeout)
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, NotionError> {
        self.base
            .join(path)
            .map_err(|e| NotionError::InvalidConfig(format!("endpoint {:?}: {}", path, e)))
    }

    /// Decode a JSON body, mapping non-2xx statuses to [`NotionError::Api`].
    async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, NotionError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let body: ErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();
            let message = if body.message.is_empty() {
                String::from_utf8_lossy(&bytes).into_owned()
            } else {
                body.message
            };
            return Err(NotionError::Api {
                status: status.as_u16(),
                code: if body.code.is_empty() {
                    "unknown".to_string()
                } else {
                    body.code
                },
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| NotionError::Decode(e.to_string()))
    }
}

#[async_trait]
impl NotionApi for NotionClient {
    async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<PaginatedList<Page>, NotionError> {
        let url = self.endpoint(&format!("databases/{}/query", database_id))?;
        debug!("Querying Notion database {}", database_id);

        let resp = self.client.post(url).json(query).send().await?;
        Self::read_json(resp).await
    }

    async fn list_block_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<PaginatedList<Block>, NotionError> {
        let mut url = self.endpoint(&format!("blocks/{}/children", block_id))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page_size", BLOCK_PAGE_SIZE);
            if let Some(cursor) = start_cursor {
                pairs.append_pair("start_cursor", cursor);
            }
        }
        debug!("Listing children of block {}", block_id);

        let resp = self.client.get(url).send().await?;
        Self::read_json(resp).await
    }
}

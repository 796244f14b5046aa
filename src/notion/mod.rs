//! Notion API access.
//!
//! [`NotionApi`] is the seam between slide normalization and the network:
//! [`NotionClient`] implements it over HTTP, tests implement it in memory.
//! The `collect_*` helpers follow pagination cursors on top of any
//! implementation.

mod client;
mod error;
pub mod types;

pub use client::{NotionClient, USER_AGENT};
pub use error::NotionError;

use async_trait::async_trait;

use types::{Block, DatabaseQuery, PaginatedList, Page};

/// The Notion endpoints glideshow consumes.
#[async_trait]
pub trait NotionApi: Send + Sync {
    /// `POST /databases/{id}/query`, one page of results.
    async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<PaginatedList<Page>, NotionError>;

    /// `GET /blocks/{id}/children`, one page of results.
    async fn list_block_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<PaginatedList<Block>, NotionError>;
}

/// Run a database query, following cursors for at most `max_pages` pages.
pub async fn collect_query<A: NotionApi + ?Sized>(
    api: &A,
    database_id: &str,
    query: &DatabaseQuery,
    max_pages: usize,
) -> Result<Vec<Page>, NotionError> {
    let mut query = query.clone();
    let mut pages = Vec::new();

    for _ in 0..max_pages.max(1) {
        let list = api.query_database(database_id, &query).await?;
        let next = list.continuation().map(str::to_string);
        pages.extend(list.results);
        match next {
            Some(cursor) => query.start_cursor = Some(cursor),
            None => return Ok(pages),
        }
    }

    tracing::warn!(
        "Database {} has more than {} result pages; truncating",
        database_id,
        max_pages
    );
    Ok(pages)
}

/// List a block's children, following cursors for at most `max_pages` pages.
pub async fn collect_block_children<A: NotionApi + ?Sized>(
    api: &A,
    block_id: &str,
    max_pages: usize,
) -> Result<Vec<Block>, NotionError> {
    let mut cursor: Option<String> = None;
    let mut blocks = Vec::new();

    for _ in 0..max_pages.max(1) {
        let list = api.list_block_children(block_id, cursor.as_deref()).await?;
        cursor = list.continuation().map(str::to_string);
        blocks.extend(list.results);
        if cursor.is_none() {
            return Ok(blocks);
        }
    }

    tracing::warn!(
        "Block {} has more than {} child pages; truncating",
        block_id,
        max_pages
    );
    Ok(blocks)
}

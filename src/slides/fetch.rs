//! Remote slide loading with fallback to the built-in set.

use futures::future::join_all;
use tracing::{debug, error, info, warn};

use super::normalize::{slide_from_page, RecordSchema};
use crate::config::NotionSettings;
use crate::models::{default_slides, Slide};
use crate::notion::types::{Block, DatabaseQuery};
use crate::notion::{collect_block_children, collect_query, NotionApi, NotionClient, NotionError};

/// Load slides from Notion using the configured credentials.
///
/// Never fails: missing credentials, client construction errors, and any
/// query failure all yield the built-in slide set.
pub async fn get_slides(settings: &NotionSettings) -> Vec<Slide> {
    let Some(creds) = settings.credentials() else {
        warn!("Notion API key or database id is not configured; serving built-in slides");
        return default_slides();
    };

    let client = match NotionClient::new(settings, creds.api_key) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create Notion client: {}", e);
            return default_slides();
        }
    };

    load_or_default(&client, creds.database_id, settings).await
}

/// Fetch slides through `api`, falling back to the built-in set on error.
pub async fn load_or_default<A: NotionApi + ?Sized>(
    api: &A,
    database_id: &str,
    settings: &NotionSettings,
) -> Vec<Slide> {
    match fetch_slides(api, database_id, settings).await {
        Ok(slides) if !slides.is_empty() => slides,
        Ok(_) => {
            warn!(
                "Notion database {} has no rows; serving built-in slides",
                database_id
            );
            default_slides()
        }
        Err(e) => {
            if e.is_permission_error() {
                error!(
                    "Notion denied access to database {} (is it shared with the integration?): {}",
                    database_id, e
                );
            } else {
                error!("Failed to fetch slides from Notion: {}", e);
            }
            default_slides()
        }
    }
}

/// Query the database and normalize every row into a slide.
///
/// Page bodies are loaded concurrently; a failed body lookup only degrades
/// that row's description.
pub async fn fetch_slides<A: NotionApi + ?Sized>(
    api: &A,
    database_id: &str,
    settings: &NotionSettings,
) -> Result<Vec<Slide>, NotionError> {
    let schema = RecordSchema::from_settings(settings);
    let query = DatabaseQuery::sorted_ascending(&settings.sort_property);
    let pages = collect_query(api, database_id, &query, settings.max_pages).await?;
    info!("Fetched {} rows from Notion database {}", pages.len(), database_id);

    let schema = &schema;
    let slides = join_all(pages.iter().map(|page| async move {
        debug!("Notion page {} properties: {:?}", page.id, page.properties);
        let body = page_body_text(api, &page.id, settings.max_pages).await;
        slide_from_page(page, body.as_deref(), schema)
    }))
    .await;

    Ok(slides)
}

/// Paragraph text of a page body, one line per paragraph block.
async fn page_body_text<A: NotionApi + ?Sized>(
    api: &A,
    page_id: &str,
    max_pages: usize,
) -> Option<String> {
    match collect_block_children(api, page_id, max_pages).await {
        Ok(blocks) => {
            let text = blocks
                .iter()
                .filter_map(Block::paragraph_text)
                .collect::<Vec<_>>()
                .join("\n");
            (!text.is_empty()).then_some(text)
        }
        Err(e) => {
            warn!("Failed to load content of Notion page {}: {}", page_id, e);
            None
        }
    }
}

//! Slide sourcing: Notion rows normalized into slides, with the built-in set
//! as the fallback for every failure mode.

mod fetch;
mod normalize;

pub use fetch::{fetch_slides, get_slides, load_or_default};
pub use normalize::{
    describe, slide_from_page, DescriptionCandidate, RecordContext, RecordSchema,
    DESCRIPTION_CANDIDATES,
};

use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;

use crate::config::NotionSettings;
use crate::models::{default_slides, Slide};

/// Something that produces the slide list served to clients.
#[async_trait]
pub trait SlideSource: Send + Sync {
    async fn slides(&self) -> Vec<Slide>;
}

/// Slides read from a Notion database.
pub struct NotionSlideSource {
    settings: NotionSettings,
}

impl NotionSlideSource {
    pub fn new(settings: NotionSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SlideSource for NotionSlideSource {
    async fn slides(&self) -> Vec<Slide> {
        get_slides(&self.settings).await
    }
}

/// Ask `source` for slides, answering with the built-in set if it panics or
/// comes back empty.
pub async fn slides_or_default(source: &dyn SlideSource) -> Vec<Slide> {
    match AssertUnwindSafe(source.slides()).catch_unwind().await {
        Ok(slides) if !slides.is_empty() => slides,
        Ok(_) => {
            tracing::warn!("Slide source returned no slides; serving built-in slides");
            default_slides()
        }
        Err(_) => {
            tracing::error!("Slide source panicked; serving built-in slides");
            default_slides()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use crate::notion::types::{Block, DatabaseQuery, PaginatedList, Page};
    use crate::notion::{NotionApi, NotionError};

    /// In-memory Notion with per-page bodies and injectable failures.
    #[derive(Default)]
    struct FakeNotion {
        pages: Vec<serde_json::Value>,
        bodies: HashMap<String, serde_json::Value>,
        failing_bodies: Vec<String>,
        query_error: Option<fn() -> NotionError>,
        queries: AtomicUsize,
    }

    #[async_trait]
    impl NotionApi for FakeNotion {
        async fn query_database(
            &self,
            _database_id: &str,
            query: &DatabaseQuery,
        ) -> Result<PaginatedList<Page>, NotionError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            assert_eq!(query.sorts[0].property, "id");
            if let Some(make_error) = self.query_error {
                return Err(make_error());
            }
            let results = self
                .pages
                .iter()
                .map(|p| serde_json::from_value(p.clone()).unwrap())
                .collect();
            Ok(PaginatedList {
                results,
                has_more: false,
                next_cursor: None,
            })
        }

        async fn list_block_children(
            &self,
            block_id: &str,
            _start_cursor: Option<&str>,
        ) -> Result<PaginatedList<Block>, NotionError> {
            if self.failing_bodies.iter().any(|id| id == block_id) {
                return Err(NotionError::Api {
                    status: 404,
                    code: "object_not_found".to_string(),
                    message: "gone".to_string(),
                });
            }
            let results = match self.bodies.get(block_id) {
                Some(blocks) => serde_json::from_value(blocks.clone()).unwrap(),
                None => Vec::new(),
            };
            Ok(PaginatedList {
                results,
                has_more: false,
                next_cursor: None,
            })
        }
    }

    fn row(id: u64, title: &str) -> serde_json::Value {
        json!({
            "id": format!("page-{}", id),
            "properties": {
                "id": {"type": "number", "number": id},
                "image": {"type": "url", "url": format!("https://img/{}.jpg", id)},
                "이름": {"type": "title", "title": [{"plain_text": title}]},
                "link": {"type": "url", "url": format!("/slide/{}", id)}
            }
        })
    }

    fn paragraphs(texts: &[&str]) -> serde_json::Value {
        let blocks: Vec<_> = texts
            .iter()
            .map(|t| json!({"type": "paragraph", "paragraph": {"rich_text": [{"plain_text": t}]}}))
            .collect();
        json!(blocks)
    }

    #[tokio::test]
    async fn test_missing_credentials_return_defaults() {
        let slides = get_slides(&NotionSettings::default()).await;
        assert_eq!(slides, default_slides());

        let settings = NotionSettings {
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        assert_eq!(get_slides(&settings).await, default_slides());
    }

    #[tokio::test]
    async fn test_rows_are_normalized_in_order() {
        let mut fake = FakeNotion {
            pages: vec![row(1, "One"), row(2, "Two")],
            ..Default::default()
        };
        fake.bodies
            .insert("page-1".to_string(), paragraphs(&["Line a", "Line b"]));

        let slides = load_or_default(&fake, "db", &NotionSettings::default()).await;
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].id, 1);
        assert_eq!(slides[0].description, "Line a\nLine b");
        assert_eq!(slides[1].description, "Two");
        assert_eq!(slides[1].link, "/slide/2");
    }

    #[tokio::test]
    async fn test_body_failure_degrades_single_row() {
        let mut fake = FakeNotion {
            pages: vec![row(1, "One"), row(2, "Two")],
            failing_bodies: vec!["page-1".to_string()],
            ..Default::default()
        };
        fake.bodies
            .insert("page-2".to_string(), paragraphs(&["Body two"]));

        let slides = load_or_default(&fake, "db", &NotionSettings::default()).await;
        assert_eq!(slides[0].description, "One");
        assert_eq!(slides[1].description, "Body two");
    }

    #[tokio::test]
    async fn test_query_errors_fall_back_to_defaults() {
        let errors: [fn() -> NotionError; 3] = [
            || NotionError::Api {
                status: 403,
                code: "restricted_resource".to_string(),
                message: "no access".to_string(),
            },
            || NotionError::Decode("expected value at line 1".to_string()),
            || NotionError::InvalidConfig("bad".to_string()),
        ];
        for make_error in errors {
            let fake = FakeNotion {
                pages: vec![row(1, "One")],
                query_error: Some(make_error),
                ..Default::default()
            };
            let slides = load_or_default(&fake, "db", &NotionSettings::default()).await;
            assert_eq!(slides, default_slides());
            assert_eq!(fake.queries.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_empty_database_falls_back_to_defaults() {
        let fake = FakeNotion::default();
        let slides = load_or_default(&fake, "db", &NotionSettings::default()).await;
        assert_eq!(slides, default_slides());
    }

    struct PanickingSource;

    #[async_trait]
    impl SlideSource for PanickingSource {
        async fn slides(&self) -> Vec<Slide> {
            panic!("slide source exploded");
        }
    }

    struct EmptySource;

    #[async_trait]
    impl SlideSource for EmptySource {
        async fn slides(&self) -> Vec<Slide> {
            Vec::new()
        }
    }

    #[tokio::test]
    async fn test_slides_or_default_absorbs_panics_and_empty_lists() {
        assert_eq!(slides_or_default(&PanickingSource).await, default_slides());
        assert_eq!(slides_or_default(&EmptySource).await, default_slides());
    }
}

//! Conversion of Notion database rows into slides.
//!
//! Rows carry arbitrary typed properties, so each slide field is read through
//! a lenient accessor with a default. The description is the first non-empty
//! result of [`DESCRIPTION_CANDIDATES`], evaluated in order.

use crate::config::NotionSettings;
use crate::models::Slide;
use crate::notion::types::Page;

/// Property names a row is read through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    pub id: String,
    pub image: String,
    pub title: String,
    pub description: String,
    pub link: String,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::from_settings(&NotionSettings::default())
    }
}

impl RecordSchema {
    pub fn from_settings(settings: &NotionSettings) -> Self {
        Self {
            id: settings.sort_property.clone(),
            image: "image".to_string(),
            title: settings.title_property.clone(),
            description: "description".to_string(),
            link: "link".to_string(),
        }
    }
}

/// Everything a description candidate may look at.
pub struct RecordContext<'a> {
    pub page: &'a Page,
    pub schema: &'a RecordSchema,
    /// Paragraph text of the page body, when it could be loaded.
    pub body_text: Option<&'a str>,
    /// Already-extracted title.
    pub title: &'a str,
}

/// One way of deriving a description.
pub type DescriptionCandidate = fn(&RecordContext<'_>) -> Option<String>;

/// Description sources in priority order.
pub const DESCRIPTION_CANDIDATES: &[(&str, DescriptionCandidate)] = &[
    ("page body", body_text),
    ("description property", description_property),
    ("title", title_text),
];

fn body_text(ctx: &RecordContext<'_>) -> Option<String> {
    ctx.body_text.map(str::to_string)
}

fn description_property(ctx: &RecordContext<'_>) -> Option<String> {
    ctx.page
        .property(&ctx.schema.description)
        .and_then(|p| p.plain_text())
}

fn title_text(ctx: &RecordContext<'_>) -> Option<String> {
    Some(ctx.title.to_string())
}

/// First non-empty candidate result, or an empty string.
pub fn describe(ctx: &RecordContext<'_>, candidates: &[(&str, DescriptionCandidate)]) -> String {
    for (name, candidate) in candidates {
        if let Some(text) = candidate(ctx).filter(|t| !t.is_empty()) {
            tracing::trace!("Description of {} taken from {}", ctx.page.id, name);
            return text;
        }
    }
    String::new()
}

fn extract_id(page: &Page, schema: &RecordSchema) -> u64 {
    page.property(&schema.id)
        .and_then(|p| p.as_number())
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n as u64)
        .unwrap_or(0)
}

fn extract_url(page: &Page, name: &str) -> String {
    page.property(name)
        .and_then(|p| p.as_url())
        .unwrap_or_default()
        .to_string()
}

fn extract_title(page: &Page, schema: &RecordSchema) -> String {
    page.property(&schema.title)
        .or_else(|| page.title_property())
        .and_then(|p| p.plain_text())
        .unwrap_or_default()
}

/// Build a slide from a database row and its body text.
pub fn slide_from_page(page: &Page, body_text: Option<&str>, schema: &RecordSchema) -> Slide {
    let title = extract_title(page, schema);
    let description = describe(
        &RecordContext {
            page,
            schema,
            body_text,
            title: &title,
        },
        DESCRIPTION_CANDIDATES,
    );

    Slide {
        id: extract_id(page, schema),
        image: extract_url(page, &schema.image),
        link: extract_url(page, &schema.link),
        title,
        description,
    }
}

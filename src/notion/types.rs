//! Wire types for the subset of the Notion API glideshow consumes.
//!
//! Property and block payloads are heterogeneous; unknown property types
//! deserialize to [`PropertyValue::Other`] and unknown block types keep only
//! their `type` tag, so new Notion features never break decoding.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedList<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl<T> PaginatedList<T> {
    /// Cursor for the next page, if there is one.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}

/// A database row.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

impl Page {
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// The page's title-typed property, whatever it is named.
    pub fn title_property(&self) -> Option<&PropertyValue> {
        self.properties
            .values()
            .find(|p| matches!(p, PropertyValue::Title { .. }))
    }
}

/// A typed property value.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    Url {
        #[serde(default)]
        url: Option<String>,
    },
    Files {
        #[serde(default)]
        files: Vec<FileObject>,
    },
    #[serde(other)]
    Other,
}

impl PropertyValue {
    /// Concatenated plain text of a title or rich-text property.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            PropertyValue::Title { title: runs } | PropertyValue::RichText { rich_text: runs } => {
                Some(concat_plain_text(runs))
            }
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number { number } => *number,
            _ => None,
        }
    }

    /// URL of a url property, or the first file of a files property.
    pub fn as_url(&self) -> Option<&str> {
        match self {
            PropertyValue::Url { url } => url.as_deref(),
            PropertyValue::Files { files } => files.iter().find_map(FileObject::url),
            _ => None,
        }
    }
}

/// A run of rich text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

/// Join the plain text of a sequence of runs.
pub fn concat_plain_text(runs: &[RichText]) -> String {
    runs.iter().map(|r| r.plain_text.as_str()).collect()
}

/// An uploaded or external file reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileObject {
    #[serde(default)]
    pub file: Option<FileUrl>,
    #[serde(default)]
    pub external: Option<FileUrl>,
}

impl FileObject {
    pub fn url(&self) -> Option<&str> {
        self.file
            .as_ref()
            .or(self.external.as_ref())
            .map(|f| f.url.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileUrl {
    pub url: String,
}

/// A content block from a page body.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub paragraph: Option<Paragraph>,
}

impl Block {
    /// Plain text of a non-empty paragraph block.
    pub fn paragraph_text(&self) -> Option<String> {
        if self.kind != "paragraph" {
            return None;
        }
        let paragraph = self.paragraph.as_ref()?;
        if paragraph.rich_text.is_empty() {
            return None;
        }
        Some(concat_plain_text(&paragraph.rich_text))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

/// Sort direction for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A property sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: SortDirection,
}

/// Body of `POST /databases/{id}/query`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl DatabaseQuery {
    /// Query sorted ascending by one property.
    pub fn sorted_ascending(property: &str) -> Self {
        Self {
            sorts: vec![Sort {
                property: property.to_string(),
                direction: SortDirection::Ascending,
            }],
            ..Default::default()
        }
    }
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

//! Raw document shapes returned by the Prismic REST API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ContentError, Result};

/// Treat empty strings the same as a missing value
fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Treat `null` the same as a missing value
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of a search query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results_size: u32,
    #[serde(default)]
    pub results: Vec<RawDocument>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub next_page: Option<String>,
}

/// A document as delivered by the API, before normalization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub first_publication_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub last_publication_date: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl RawDocument {
    /// Decode the `data` object into the post field set
    pub fn post_data(&self) -> Result<RawPostData> {
        if self.data.is_null() {
            return Ok(RawPostData::default());
        }
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

/// Fields of a `posts` document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPostData {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub banner: Option<RawImage>,
    /// Decoded on demand by [`RawPostData::content_blocks`]
    pub content: Option<serde_json::Value>,
}

impl RawPostData {
    /// The `content` group field.
    ///
    /// `None` when it is absent, null or not shaped like a list of blocks.
    pub fn content_blocks(&self) -> Option<Vec<RawContentBlock>> {
        let value = self.content.as_ref().filter(|v| !v.is_null())?;
        match serde_json::from_value(value.clone()) {
            Ok(blocks) => Some(blocks),
            Err(e) => {
                tracing::warn!("Ignoring unreadable content field: {}", e);
                None
            }
        }
    }
}

/// Image field; an unset image is an empty object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawImage {
    #[serde(deserialize_with = "empty_string_as_none")]
    pub url: Option<String>,
    pub alt: Option<String>,
}

/// One entry of the `content` group field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawContentBlock {
    pub heading: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub body: Vec<RawRichTextBlock>,
}

/// A structured text block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRichTextBlock {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub spans: Vec<RawSpan>,
}

/// Inline markup over a range of a text block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSpan {
    #[serde(deserialize_with = "null_as_default")]
    pub start: usize,
    #[serde(deserialize_with = "null_as_default")]
    pub end: usize,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    pub data: Option<serde_json::Value>,
}

/// Parse an API timestamp.
///
/// The API writes offsets without a colon (`2021-03-15T19:25:28+0000`);
/// RFC 3339 is accepted as well.
pub fn parse_timestamp(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    let formats = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"];
    for fmt in formats {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Ok(Some(dt.with_timezone(&Utc)));
        }
    }

    Err(ContentError::FetchFailure(format!(
        "malformed payload: invalid timestamp '{}'",
        raw
    )))
}

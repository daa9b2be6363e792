//! Normalized post models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::raw::{parse_timestamp, RawDocument, RawRichTextBlock, RawSpan};
use crate::error::{ContentError, Result};

/// A post as listed on the home page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    /// URL-safe identifier
    pub uid: String,

    /// First publication date (`None` for unpublished drafts)
    pub first_publication_date: Option<DateTime<Utc>>,

    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostSummary {
    /// Normalize a list query result.
    ///
    /// `uid` and `title` are required; a result without them is a
    /// malformed payload.
    pub fn from_raw(raw: &RawDocument) -> Result<Self> {
        let data = raw.post_data()?;
        let uid = required_uid(raw)?;
        let title = data
            .title
            .ok_or_else(|| ContentError::malformed_payload("data.title"))?;

        Ok(Self {
            uid,
            first_publication_date: parse_timestamp(raw.first_publication_date.as_deref())?,
            title,
            subtitle: data.subtitle.unwrap_or_default(),
            author: data.author.unwrap_or_default(),
        })
    }
}

/// A full post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDocument {
    pub uid: String,
    pub first_publication_date: Option<DateTime<Utc>>,
    pub last_publication_date: Option<DateTime<Utc>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,

    /// Banner image URL, if one is set
    pub banner_url: Option<String>,

    /// Content blocks in reading order; `None` when the document has no
    /// `content` field at all
    pub content: Option<Vec<ContentBlock>>,
}

impl PostDocument {
    /// Normalize a full document
    pub fn from_raw(raw: &RawDocument) -> Result<Self> {
        let data = raw.post_data()?;
        let uid = required_uid(raw)?;
        let title = data
            .title
            .clone()
            .ok_or_else(|| ContentError::malformed_payload("data.title"))?;

        let content = data.content_blocks().map(|blocks| {
            blocks
                .into_iter()
                .map(|block| ContentBlock {
                    heading: block.heading.unwrap_or_default(),
                    body: block.body.iter().map(RichTextBlock::from_raw).collect(),
                })
                .collect()
        });

        Ok(Self {
            uid,
            first_publication_date: parse_timestamp(raw.first_publication_date.as_deref())?,
            last_publication_date: parse_timestamp(raw.last_publication_date.as_deref())?,
            title,
            subtitle: data.subtitle.unwrap_or_default(),
            author: data.author.unwrap_or_default(),
            banner_url: data.banner.and_then(|b| b.url),
            content,
        })
    }

    /// Content blocks, or `MalformedContent` when the field is absent
    pub fn blocks(&self) -> Result<&[ContentBlock]> {
        self.content
            .as_deref()
            .ok_or_else(|| ContentError::MalformedContent {
                uid: self.uid.clone(),
                field: "content",
            })
    }

    pub fn summary(&self) -> PostSummary {
        PostSummary {
            uid: self.uid.clone(),
            first_publication_date: self.first_publication_date,
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            author: self.author.clone(),
        }
    }
}

fn required_uid(raw: &RawDocument) -> Result<String> {
    raw.uid
        .clone()
        .filter(|uid| !uid.is_empty())
        .ok_or_else(|| ContentError::malformed_payload("uid"))
}

/// One heading with its rich-text body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub heading: String,
    pub body: Vec<RichTextBlock>,
}

impl ContentBlock {
    /// Build a block whose body is plain paragraphs
    pub fn new(heading: &str, paragraphs: &[&str]) -> Self {
        Self {
            heading: heading.to_string(),
            body: paragraphs
                .iter()
                .map(|text| RichTextBlock::paragraph(text))
                .collect(),
        }
    }
}

/// A structured text block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextBlock {
    pub kind: BlockKind,
    pub text: String,
    pub spans: Vec<Span>,
}

impl RichTextBlock {
    pub fn paragraph(text: &str) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            text: text.to_string(),
            spans: Vec::new(),
        }
    }

    fn from_raw(raw: &RawRichTextBlock) -> Self {
        Self {
            kind: BlockKind::from(raw.kind.as_str()),
            text: raw.text.clone(),
            spans: raw.spans.iter().map(Span::from_raw).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Paragraph,
    /// `heading1` through `heading6`
    Heading(u8),
    ListItem,
    OrderedListItem,
    Preformatted,
    Other(String),
}

impl From<&str> for BlockKind {
    fn from(value: &str) -> Self {
        match value {
            "" | "paragraph" => BlockKind::Paragraph,
            "list-item" => BlockKind::ListItem,
            "o-list-item" => BlockKind::OrderedListItem,
            "preformatted" => BlockKind::Preformatted,
            other => match other.strip_prefix("heading").and_then(|n| n.parse().ok()) {
                Some(level @ 1..=6) => BlockKind::Heading(level),
                _ => BlockKind::Other(other.to_string()),
            },
        }
    }
}

/// Inline markup over `start..end` (character offsets) of a text block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

impl Span {
    fn from_raw(raw: &RawSpan) -> Self {
        let data_str = |key: &str| {
            raw.data
                .as_ref()
                .and_then(|d| d.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        let kind = match raw.kind.as_str() {
            "strong" => SpanKind::Strong,
            "em" => SpanKind::Em,
            "hyperlink" => match data_str("url") {
                Some(url) => SpanKind::Hyperlink(url),
                None => SpanKind::Other(raw.kind.clone()),
            },
            "label" => SpanKind::Label(data_str("label").unwrap_or_default()),
            other => SpanKind::Other(other.to_string()),
        };

        Self {
            start: raw.start,
            end: raw.end,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanKind {
    Strong,
    Em,
    Hyperlink(String),
    Label(String),
    Other(String),
}

/// A page of post summaries with the cursor to the next page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<PostSummary>,

    /// `None` when there are no further pages
    pub next_page: Option<String>,
}

/// Previous/next navigation target.
///
/// Both fields `None` means there is no post in that direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacentPost {
    pub uid: Option<String>,
    pub title: Option<String>,
}

impl AdjacentPost {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.uid.is_none() && self.title.is_none()
    }

    /// Take the first result of an adjacency query
    pub fn from_raw(raw: Option<&RawDocument>) -> Self {
        match raw {
            Some(doc) => Self {
                uid: doc.uid.clone(),
                title: doc
                    .data
                    .get("title")
                    .and_then(|t| t.as_str())
                    .map(str::to_string),
            },
            None => Self::none(),
        }
    }
}

//! Document types and link resolution

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

/// Characters escaped in a uid path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Known content types of the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Homepage,
    Posts,
    Other(String),
}

impl DocumentType {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentType::Homepage => "homepage",
            DocumentType::Posts => "posts",
            DocumentType::Other(name) => name,
        }
    }
}

impl From<&str> for DocumentType {
    fn from(value: &str) -> Self {
        match value {
            "homepage" => DocumentType::Homepage,
            "posts" => DocumentType::Posts,
            other => DocumentType::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the site path of a document.
///
/// Returns `None` for types the site has no route for, and for posts
/// without a uid. The uid is percent-encoded into a single path segment.
pub fn link_resolver(doc_type: &DocumentType, uid: Option<&str>) -> Option<String> {
    match doc_type {
        DocumentType::Homepage => Some("/".to_string()),
        DocumentType::Posts => uid.map(|uid| format!("/post/{}", utf8_percent_encode(uid, SEGMENT))),
        DocumentType::Other(_) => None,
    }
}

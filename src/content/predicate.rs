//! Query predicates, orderings and options for the search API

use chrono::{DateTime, Utc};
use std::fmt;

/// Document field holding the first publication date
pub const FIRST_PUBLICATION_DATE: &str = "document.first_publication_date";

/// A filter expression of the search API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Field equals value
    At { path: String, value: String },
    /// Date field strictly before the instant
    DateBefore { path: String, date: DateTime<Utc> },
    /// Date field strictly after the instant
    DateAfter { path: String, date: DateTime<Utc> },
}

impl Predicate {
    pub fn document_type(doc_type: &str) -> Self {
        Predicate::At {
            path: "document.type".to_string(),
            value: doc_type.to_string(),
        }
    }

    pub fn uid(doc_type: &str, uid: &str) -> Self {
        Predicate::At {
            path: format!("my.{}.uid", doc_type),
            value: uid.to_string(),
        }
    }

    pub fn published_before(date: DateTime<Utc>) -> Self {
        Predicate::DateBefore {
            path: FIRST_PUBLICATION_DATE.to_string(),
            date,
        }
    }

    pub fn published_after(date: DateTime<Utc>) -> Self {
        Predicate::DateAfter {
            path: FIRST_PUBLICATION_DATE.to_string(),
            date,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::At { path, value } => {
                write!(f, "[at({}, \"{}\")]", path, value.replace('"', "\\\""))
            }
            Predicate::DateBefore { path, date } => {
                write!(f, "[date.before({}, {})]", path, date.timestamp_millis())
            }
            Predicate::DateAfter { path, date } => {
                write!(f, "[date.after({}, {})]", path, date.timestamp_millis())
            }
        }
    }
}

/// Render the `q` parameter for a list of predicates
pub fn render_query(predicates: &[Predicate]) -> String {
    let inner: String = predicates.iter().map(|p| p.to_string()).collect();
    format!("[{}]", inner)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Ordering of search results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub field: String,
    pub direction: Direction,
}

impl Ordering {
    pub fn new(field: &str, direction: Direction) -> Self {
        Self {
            field: field.to_string(),
            direction,
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Asc => write!(f, "[{}]", self.field),
            Direction::Desc => write!(f, "[{} desc]", self.field),
        }
    }
}

/// Options of a search query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Fields to return, as `type.field`
    pub fetch: Vec<String>,
    pub page_size: Option<usize>,
    pub ordering: Option<Ordering>,
    /// Snapshot to read; `None` reads the published content
    pub preview_ref: Option<String>,
}

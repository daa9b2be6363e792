//! In-memory content API used by tests

use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;

use super::api::ContentApi;
use super::predicate::{Direction, Predicate, QueryOptions};
use super::raw::{parse_timestamp, QueryResponse, RawDocument};
use crate::error::{ContentError, Result};

/// A `posts` document titled "Post <uid>" with one content block
pub fn post(uid: &str, first_publication_date: &str) -> RawDocument {
    serde_json::from_value(json!({
        "id": format!("id-{}", uid),
        "uid": uid,
        "type": "posts",
        "first_publication_date": first_publication_date,
        "last_publication_date": first_publication_date,
        "data": {
            "title": format!("Post {}", uid),
            "subtitle": format!("About {}", uid),
            "author": "Joseph Oliveira",
            "banner": {"url": format!("https://images.example.com/{}.png", uid)},
            "content": [
                {"heading": "Intro", "body": [
                    {"type": "paragraph", "text": "one two three", "spans": []}
                ]}
            ]
        }
    }))
    .expect("valid mock document")
}

/// Serves a fixed set of documents, paginating like the real API
pub struct MockApi {
    docs: Vec<RawDocument>,
    pages: Mutex<HashMap<String, QueryResponse>>,
    failing: AtomicBool,
    queries: AtomicUsize,
    last_ref: Mutex<Option<String>>,
    unpublished: Mutex<HashSet<String>>,
}

impl MockApi {
    pub fn new(docs: Vec<RawDocument>) -> Self {
        Self {
            docs,
            pages: Mutex::new(HashMap::new()),
            failing: AtomicBool::new(false),
            queries: AtomicUsize::new(0),
            last_ref: Mutex::new(None),
            unpublished: Mutex::new(HashSet::new()),
        }
    }

    /// Make every following call fail like a transport error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, AtomicOrdering::SeqCst);
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(AtomicOrdering::SeqCst)
    }

    /// Ref used by the most recent query or lookup
    pub fn last_ref(&self) -> Option<String> {
        self.last_ref.lock().unwrap().clone()
    }

    /// Keep listing a post but stop returning it from uid lookups, like a
    /// post removed between two requests
    pub fn unpublish(&self, uid: &str) {
        self.unpublished.lock().unwrap().insert(uid.to_string());
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(AtomicOrdering::SeqCst) {
            return Err(ContentError::FetchFailure("connection refused".to_string()));
        }
        Ok(())
    }

    fn matches(doc: &RawDocument, predicate: &Predicate) -> bool {
        let date = || {
            parse_timestamp(doc.first_publication_date.as_deref())
                .ok()
                .flatten()
        };
        match predicate {
            Predicate::At { path, value } if path == "document.type" => doc.doc_type == *value,
            Predicate::At { path, value } if path.ends_with(".uid") => {
                doc.uid.as_deref() == Some(value.as_str())
            }
            Predicate::At { .. } => false,
            Predicate::DateBefore { date: bound, .. } => date().is_some_and(|d| d < *bound),
            Predicate::DateAfter { date: bound, .. } => date().is_some_and(|d| d > *bound),
        }
    }
}

#[async_trait]
impl ContentApi for MockApi {
    async fn query(
        &self,
        predicates: &[Predicate],
        options: &QueryOptions,
    ) -> Result<QueryResponse> {
        self.check()?;
        let serial = self.queries.fetch_add(1, AtomicOrdering::SeqCst);
        *self.last_ref.lock().unwrap() = options.preview_ref.clone();

        let mut matched: Vec<RawDocument> = self
            .docs
            .iter()
            .filter(|doc| predicates.iter().all(|p| Self::matches(doc, p)))
            .cloned()
            .collect();

        if let Some(ordering) = &options.ordering {
            matched.sort_by_key(|doc| {
                parse_timestamp(doc.first_publication_date.as_deref())
                    .ok()
                    .flatten()
            });
            if ordering.direction == Direction::Desc {
                matched.reverse();
            }
        }

        let size = options.page_size.unwrap_or(20).max(1);
        let chunks: Vec<Vec<RawDocument>> = matched.chunks(size).map(|c| c.to_vec()).collect();
        let total_pages = chunks.len() as u32;
        let cursor = |page: usize| format!("mock://query/{}/page/{}", serial, page);

        let mut first = None;
        let mut pages = self.pages.lock().unwrap();
        for (index, results) in chunks.into_iter().enumerate() {
            let page = index + 1;
            let response = QueryResponse {
                page: page as u32,
                total_pages,
                total_results_size: matched.len() as u32,
                results,
                next_page: (page < total_pages as usize).then(|| cursor(page + 1)),
            };
            if page == 1 {
                first = Some(response);
            } else {
                pages.insert(cursor(page), response);
            }
        }

        Ok(first.unwrap_or_default())
    }

    async fn fetch_page(&self, cursor: &str) -> Result<QueryResponse> {
        self.check()?;
        self.pages
            .lock()
            .unwrap()
            .get(cursor)
            .cloned()
            .ok_or_else(|| ContentError::FetchFailure(format!("unknown cursor {}", cursor)))
    }

    async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
        preview_ref: Option<&str>,
    ) -> Result<Option<RawDocument>> {
        self.check()?;
        *self.last_ref.lock().unwrap() = preview_ref.map(str::to_string);
        if self.unpublished.lock().unwrap().contains(uid) {
            return Ok(None);
        }
        Ok(self
            .docs
            .iter()
            .find(|doc| doc.doc_type == doc_type && doc.uid.as_deref() == Some(uid))
            .cloned())
    }
}

//! The seam between the adapter and the external content service

use async_trait::async_trait;

use super::predicate::{Predicate, QueryOptions};
use super::raw::{QueryResponse, RawDocument};
use crate::error::Result;

/// Read-only document query API
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Run a search query and return its first page
    async fn query(&self, predicates: &[Predicate], options: &QueryOptions)
        -> Result<QueryResponse>;

    /// Fetch a page through an opaque `next_page` cursor
    async fn fetch_page(&self, cursor: &str) -> Result<QueryResponse>;

    /// Look a document up by type and uid; `Ok(None)` when none matches
    async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
        preview_ref: Option<&str>,
    ) -> Result<Option<RawDocument>>;
}

//! Content adapter - turns API documents into normalized posts

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

use super::api::ContentApi;
use super::post::{AdjacentPost, PostDocument, PostPage, PostSummary};
use super::predicate::{Direction, Ordering, Predicate, QueryOptions, FIRST_PUBLICATION_DATE};
use super::raw::QueryResponse;
use crate::error::{ContentError, Result};

/// Fields requested for the post list
const LIST_FIELDS: [&str; 5] = ["title", "subtitle", "author", "banner", "content"];

/// Reads posts of one content type, optionally from a preview snapshot
pub struct ContentAdapter<A> {
    api: Arc<A>,
    doc_type: String,
    preview_ref: Option<String>,
}

impl<A> Clone for ContentAdapter<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            doc_type: self.doc_type.clone(),
            preview_ref: self.preview_ref.clone(),
        }
    }
}

impl<A: ContentApi> ContentAdapter<A> {
    pub fn new(api: A, doc_type: &str) -> Self {
        Self::shared(Arc::new(api), doc_type)
    }

    pub fn shared(api: Arc<A>, doc_type: &str) -> Self {
        Self {
            api,
            doc_type: doc_type.to_string(),
            preview_ref: None,
        }
    }

    /// A copy of this adapter reading from the given snapshot
    pub fn with_preview_ref(&self, preview_ref: Option<String>) -> Self {
        Self {
            api: Arc::clone(&self.api),
            doc_type: self.doc_type.clone(),
            preview_ref: preview_ref.filter(|r| !r.is_empty()),
        }
    }

    pub fn preview_ref(&self) -> Option<&str> {
        self.preview_ref.as_deref()
    }

    pub fn is_preview(&self) -> bool {
        self.preview_ref.is_some()
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the first page of posts, in the API's default order
    pub async fn fetch_post_list(&self, page_size: usize) -> Result<PostPage> {
        if page_size == 0 {
            return Err(ContentError::FetchFailure(
                "page size must be at least 1".to_string(),
            ));
        }

        let options = QueryOptions {
            fetch: LIST_FIELDS
                .iter()
                .map(|field| format!("{}.{}", self.doc_type, field))
                .collect(),
            page_size: Some(page_size),
            ordering: None,
            preview_ref: self.preview_ref.clone(),
        };

        let response = self
            .api
            .query(&[Predicate::document_type(&self.doc_type)], &options)
            .await?;
        normalize_page(response)
    }

    /// Fetch the page behind a `next_page` cursor
    pub async fn fetch_next_page(&self, cursor: &str) -> Result<PostPage> {
        debug!(cursor = %cursor, "Fetching next page");
        let response = self.api.fetch_page(cursor).await?;
        normalize_page(response)
    }

    /// Fetch a full post; `NotFound` when the uid does not exist
    pub async fn fetch_post_by_uid(&self, uid: &str) -> Result<PostDocument> {
        let raw = self
            .api
            .get_by_uid(&self.doc_type, uid, self.preview_ref.as_deref())
            .await?
            .ok_or_else(|| ContentError::NotFound {
                doc_type: self.doc_type.clone(),
                uid: uid.to_string(),
            })?;
        PostDocument::from_raw(&raw)
    }

    /// Find the posts published immediately before and after a date.
    ///
    /// Missing neighbours come back as [`AdjacentPost::none`]. A post
    /// without a publication date has no neighbours.
    pub async fn find_adjacent_posts(
        &self,
        reference_date: Option<DateTime<Utc>>,
    ) -> Result<(AdjacentPost, AdjacentPost)> {
        let Some(date) = reference_date else {
            return Ok((AdjacentPost::none(), AdjacentPost::none()));
        };

        let previous = self.adjacent(Predicate::published_before(date), Direction::Desc);
        let next = self.adjacent(Predicate::published_after(date), Direction::Asc);
        let (previous, next) = tokio::join!(previous, next);

        Ok((previous?, next?))
    }

    async fn adjacent(&self, bound: Predicate, direction: Direction) -> Result<AdjacentPost> {
        let options = QueryOptions {
            fetch: vec![format!("{}.title", self.doc_type)],
            page_size: Some(1),
            ordering: Some(Ordering::new(FIRST_PUBLICATION_DATE, direction)),
            preview_ref: self.preview_ref.clone(),
        };

        let response = self
            .api
            .query(&[Predicate::document_type(&self.doc_type), bound], &options)
            .await?;
        Ok(AdjacentPost::from_raw(response.results.first()))
    }
}

fn normalize_page(response: QueryResponse) -> Result<PostPage> {
    let posts = response
        .results
        .iter()
        .map(PostSummary::from_raw)
        .collect::<Result<Vec<_>>>()?;

    Ok(PostPage {
        posts,
        next_page: response.next_page,
    })
}

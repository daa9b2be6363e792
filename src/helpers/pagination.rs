//! "Load more" pagination over the post list

use serde::{Deserialize, Serialize};

use crate::content::{ContentAdapter, ContentApi, PostPage, PostSummary};
use crate::error::Result;

/// Append a fetched page to the posts already shown.
///
/// Order is preserved on both sides and nothing is deduplicated.
pub fn merge_page(existing: Vec<PostSummary>, incoming: Vec<PostSummary>) -> Vec<PostSummary> {
    let mut merged = existing;
    merged.extend(incoming);
    merged
}

/// Accumulated state of a post list view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostListState {
    pub posts: Vec<PostSummary>,
    pub next_page: Option<String>,
}

impl PostListState {
    pub fn from_page(page: PostPage) -> Self {
        Self {
            posts: page.posts,
            next_page: page.next_page,
        }
    }

    /// Whether a "load more" affordance should be offered
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Merge a page and move to its cursor
    pub fn apply(self, page: PostPage) -> Self {
        Self {
            posts: merge_page(self.posts, page.posts),
            next_page: page.next_page,
        }
    }
}

/// Fetch the next page and return the merged state.
///
/// On failure the caller's state is untouched. Without a cursor the state
/// is returned as-is and nothing is fetched.
pub async fn load_more<A: ContentApi>(
    adapter: &ContentAdapter<A>,
    state: &PostListState,
) -> Result<PostListState> {
    let Some(cursor) = state.next_page.as_deref() else {
        return Ok(state.clone());
    };

    let page = adapter.fetch_next_page(cursor).await?;
    tracing::debug!("Loaded {} more posts", page.posts.len());
    Ok(state.clone().apply(page))
}

/// Follow cursors until the last page
pub async fn collect_all<A: ContentApi>(
    adapter: &ContentAdapter<A>,
    first: PostPage,
) -> Result<PostListState> {
    let mut state = PostListState::from_page(first);
    while state.has_more() {
        state = load_more(adapter, &state).await?;
    }
    Ok(state)
}

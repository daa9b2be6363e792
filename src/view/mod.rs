//! Page assembly shared by the generator and the server

use crate::content::{ContentAdapter, ContentApi};
use crate::error::Result;
use crate::helpers::{load_more, DateFormatter, PostListState};
use crate::templates::{IndexData, PostCardData, PostPageData};

/// Link to the `n`-th accumulated list page
pub fn list_page_href(n: usize) -> String {
    if n <= 1 {
        "/".to_string()
    } else {
        format!("/page/{}/", n)
    }
}

/// Load the first `pages` pages of the post list, merged in order.
///
/// Stops early when the cursor runs out.
pub async fn post_list<A: ContentApi>(
    adapter: &ContentAdapter<A>,
    page_size: usize,
    pages: usize,
) -> Result<PostListState> {
    let first = adapter.fetch_post_list(page_size).await?;
    let mut state = PostListState::from_page(first);

    for _ in 1..pages {
        if !state.has_more() {
            break;
        }
        state = load_more(adapter, &state).await?;
    }

    Ok(state)
}

/// Cards for a list state, with the "load more" link pointing at `more_href`
/// while the list has a cursor
pub fn index_data(
    state: &PostListState,
    formatter: &DateFormatter,
    more_href: impl FnOnce() -> String,
) -> IndexData {
    IndexData {
        posts: state
            .posts
            .iter()
            .map(|summary| PostCardData::from_summary(summary, formatter))
            .collect(),
        more_href: state.has_more().then(more_href),
    }
}

/// Fetch a post and its neighbours and derive everything the post page shows
pub async fn post_page<A: ContentApi>(
    adapter: &ContentAdapter<A>,
    formatter: &DateFormatter,
    uid: &str,
) -> Result<PostPageData> {
    let post = adapter.fetch_post_by_uid(uid).await?;
    let (previous, next) = adapter
        .find_adjacent_posts(post.first_publication_date)
        .await?;
    Ok(PostPageData::build(&post, &previous, &next, formatter))
}

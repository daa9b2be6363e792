//! List the posts of the content repository

use anyhow::Result;

use crate::content::{ContentAdapter, ContentApi, PostSummary};
use crate::helpers::{collect_all, DateFormatter};
use crate::Blog;

/// Print every post, following the list cursors to the end
pub async fn run(blog: &Blog, preview_ref: Option<String>) -> Result<()> {
    let adapter = blog.adapter(preview_ref)?;
    let posts = load_all(&adapter, blog.config.page_size).await?;

    println!("Posts ({}):", posts.len());
    for line in listing(&posts, &blog.formatter()) {
        println!("  {}", line);
    }

    Ok(())
}

/// All post summaries, in list order
pub async fn load_all<A: ContentApi>(
    adapter: &ContentAdapter<A>,
    page_size: usize,
) -> Result<Vec<PostSummary>> {
    let first = adapter.fetch_post_list(page_size).await?;
    Ok(collect_all(adapter, first).await?.posts)
}

/// One line per post: date, title and uid
pub fn listing(posts: &[PostSummary], formatter: &DateFormatter) -> Vec<String> {
    posts
        .iter()
        .map(|post| {
            let date = match &post.first_publication_date {
                Some(date) => formatter.format_date(date),
                None => "unpublished".to_string(),
            };
            format!("{} - {} [{}]", date, post.title, post.uid)
        })
        .collect()
}

//! Show one post as the post page would present it

use anyhow::Result;
use std::fmt::Write;

use crate::i18n::Labels;
use crate::templates::PostPageData;
use crate::view;
use crate::Blog;

pub async fn run(blog: &Blog, uid: &str, preview_ref: Option<String>) -> Result<()> {
    let adapter = blog.adapter(preview_ref)?;
    let page = view::post_page(&adapter, &blog.formatter(), uid).await?;
    print!("{}", describe(&page, &blog.config.locale().labels()));
    Ok(())
}

/// Plain-text summary of a post page
pub fn describe(page: &PostPageData, labels: &Labels) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", page.title);
    if !page.subtitle.is_empty() {
        let _ = writeln!(out, "{}", page.subtitle);
    }
    let _ = writeln!(
        out,
        "{} | {} | {} {}",
        page.date, page.author, page.minutes, labels.minutes
    );
    if let Some(edited) = &page.edited {
        let _ = writeln!(out, "{} {}", labels.edited, edited);
    }

    for block in &page.blocks {
        let _ = writeln!(out, "  # {}", block.heading);
    }

    if let Some(previous) = &page.previous {
        let _ = writeln!(out, "{}: {} ({})", labels.previous_post, previous.title, previous.href);
    }
    if let Some(next) = &page.next {
        let _ = writeln!(out, "{}: {} ({})", labels.next_post, next.title, next.href);
    }

    out
}

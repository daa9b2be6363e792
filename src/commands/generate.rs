//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Generate the static site from the published content, or from a preview
/// snapshot when a ref is given
pub async fn run(blog: &Blog, preview_ref: Option<String>) -> Result<()> {
    let start = std::time::Instant::now();

    let adapter = blog.adapter(preview_ref)?;
    if adapter.is_preview() {
        tracing::info!("Generating from preview ref");
    }

    let generator = Generator::new(blog, adapter)?;
    let report = generator.generate().await?;

    if !report.skipped.is_empty() {
        tracing::warn!(
            "Skipped {} posts: {}",
            report.skipped.len(),
            report.skipped.join(", ")
        );
    }

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts and {} list pages in {:.2}s",
        report.posts,
        report.list_pages,
        duration.as_secs_f64()
    );

    Ok(())
}

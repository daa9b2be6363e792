//! Generator module - writes the blog as static HTML files

use anyhow::{anyhow, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CommentsConfig;
use crate::content::{ContentAdapter, ContentApi};
use crate::helpers::{load_more, DateFormatter, PostListState};
use crate::templates::{SiteData, TemplateRenderer};
use crate::view;
use crate::Blog;

/// What a generation run wrote
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Accumulated list pages, `index.html` included
    pub list_pages: usize,
    /// Post pages written
    pub posts: usize,
    /// Uids whose page could not be generated
    pub skipped: Vec<String>,
}

/// Static site generator using the embedded templates
pub struct Generator<A> {
    adapter: ContentAdapter<A>,
    renderer: TemplateRenderer,
    formatter: DateFormatter,
    site: SiteData,
    comments: Option<CommentsConfig>,
    page_size: usize,
    public_dir: PathBuf,
}

impl<A: ContentApi> Generator<A> {
    /// Create a new generator
    pub fn new(blog: &Blog, adapter: ContentAdapter<A>) -> Result<Self> {
        let site = SiteData::new(&blog.config, adapter.is_preview());
        Ok(Self {
            renderer: TemplateRenderer::new()?,
            formatter: blog.formatter(),
            site,
            comments: blog.config.comments.clone(),
            page_size: blog.config.page_size,
            public_dir: blog.public_dir.clone(),
            adapter,
        })
    }

    /// Generate the entire site.
    ///
    /// A post that fails to load is logged and skipped. When the post list
    /// itself cannot be fetched the "could not load" page is written as
    /// `index.html` and an error is returned.
    pub async fn generate(&self) -> Result<GenerateReport> {
        fs::create_dir_all(&self.public_dir)?;

        let states = match self.list_states().await {
            Ok(states) => states,
            Err(e) => {
                let message = self.site.labels.could_not_load;
                let html = self.renderer.render_error(&self.site, 502, message)?;
                self.write_page(Path::new("index.html"), &html)?;
                return Err(anyhow!("Failed to load the post list: {}", e));
            }
        };

        let mut report = GenerateReport::default();
        self.generate_list_pages(&states)?;
        report.list_pages = states.len();

        if let Some(last) = states.last() {
            self.generate_post_pages(last, &mut report).await?;
        }

        self.generate_not_found_page()?;

        Ok(report)
    }

    /// Every accumulated state of the list, one per "load more" step.
    ///
    /// A failing step ends the list early so no page links to a missing one.
    async fn list_states(&self) -> crate::error::Result<Vec<PostListState>> {
        let first = self.adapter.fetch_post_list(self.page_size).await?;
        let mut states = vec![PostListState::from_page(first)];

        loop {
            let Some(state) = states.last().filter(|s| s.has_more()) else {
                break;
            };
            match load_more(&self.adapter, state).await {
                Ok(next) => states.push(next),
                Err(e) => {
                    tracing::warn!("Stopped loading more posts: {}", e);
                    break;
                }
            }
        }

        tracing::info!(
            "Loaded {} posts in {} pages",
            states.last().map_or(0, |s| s.posts.len()),
            states.len()
        );
        Ok(states)
    }

    /// Generate `index.html` and `page/<n>/index.html`
    fn generate_list_pages(&self, states: &[PostListState]) -> Result<()> {
        for (i, state) in states.iter().enumerate() {
            let page_num = i + 1;
            let mut index = view::index_data(state, &self.formatter, || {
                view::list_page_href(page_num + 1)
            });
            if page_num == states.len() {
                index.more_href = None;
            }

            let html = self.renderer.render_index(&self.site, &index)?;
            let output_path = if page_num == 1 {
                PathBuf::from("index.html")
            } else {
                PathBuf::from(format!("page/{}/index.html", page_num))
            };
            self.write_page(&output_path, &html)?;
        }

        Ok(())
    }

    /// Generate `post/<uid>/index.html` for every listed post
    async fn generate_post_pages(
        &self,
        state: &PostListState,
        report: &mut GenerateReport,
    ) -> Result<()> {
        let mut seen = HashSet::new();

        for summary in &state.posts {
            if !seen.insert(summary.uid.as_str()) {
                continue;
            }

            let page = match view::post_page(&self.adapter, &self.formatter, &summary.uid).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Skipping post '{}': {}", summary.uid, e);
                    report.skipped.push(summary.uid.clone());
                    continue;
                }
            };

            let html = self
                .renderer
                .render_post(&self.site, &page, self.comments.as_ref())?;
            self.write_page(&Path::new("post").join(&summary.uid).join("index.html"), &html)?;
            report.posts += 1;
        }

        Ok(())
    }

    fn generate_not_found_page(&self) -> Result<()> {
        let html = self
            .renderer
            .render_error(&self.site, 404, self.site.labels.not_found)?;
        self.write_page(Path::new("404.html"), &html)
    }

    fn write_page(&self, relative: &Path, html: &str) -> Result<()> {
        let output_path = self.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, html)
            .map_err(|e| anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}

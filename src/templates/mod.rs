//! Built-in blog templates using the Tera template engine
//!
//! Templates are embedded in the binary; the data structures below are the
//! display-ready shapes handed to them.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::{BlogConfig, CommentsConfig};
use crate::content::{link_resolver, AdjacentPost, DocumentType, PostDocument, PostSummary};
use crate::helpers::{as_html, reading_minutes, DateFormatter};
use crate::i18n::Labels;

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("error.html", include_str!("blog/error.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    pub fn render_index(&self, site: &SiteData, index: &IndexData) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("index", index);
        self.render("index.html", &context)
    }

    pub fn render_post(
        &self,
        site: &SiteData,
        post: &PostPageData,
        comments: Option<&CommentsConfig>,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("post", post);
        context.insert("comments", &comments.filter(|c| !c.repo.is_empty()));
        self.render("post.html", &context)
    }

    pub fn render_error(&self, site: &SiteData, status: u16, message: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("error", &ErrorData { status, message });
        self.render("error.html", &context)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub lang: &'static str,
    pub labels: Labels,
    /// Whether the page shows a preview snapshot
    pub preview: bool,
}

impl SiteData {
    pub fn new(config: &BlogConfig, preview: bool) -> Self {
        let locale = config.locale();
        Self {
            title: config.title.clone(),
            lang: locale.tag(),
            labels: locale.labels(),
            preview,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostCardData {
    pub uid: String,
    pub href: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
}

impl PostCardData {
    pub fn from_summary(summary: &PostSummary, formatter: &DateFormatter) -> Self {
        Self {
            uid: summary.uid.clone(),
            href: post_href(&summary.uid),
            title: summary.title.clone(),
            subtitle: summary.subtitle.clone(),
            author: summary.author.clone(),
            date: formatter.format_optional(summary.first_publication_date.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexData {
    pub posts: Vec<PostCardData>,
    /// Target of the "load more" link, absent on the last page
    pub more_href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavPostData {
    pub title: String,
    pub href: String,
}

impl NavPostData {
    /// `None` for the terminal "no adjacent post" value
    pub fn from_adjacent(adjacent: &AdjacentPost) -> Option<Self> {
        let uid = adjacent.uid.as_deref()?;
        Some(Self {
            title: adjacent.title.clone().unwrap_or_else(|| uid.to_string()),
            href: post_href(uid),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockData {
    pub heading: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner_url: Option<String>,
    pub date: String,
    /// "Last edited" date, when the post changed after publication
    pub edited: Option<String>,
    pub minutes: u32,
    pub blocks: Vec<BlockData>,
    pub previous: Option<NavPostData>,
    pub next: Option<NavPostData>,
}

impl PostPageData {
    pub fn build(
        post: &PostDocument,
        previous: &AdjacentPost,
        next: &AdjacentPost,
        formatter: &DateFormatter,
    ) -> Self {
        let blocks = post
            .content
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|block| BlockData {
                heading: block.heading.clone(),
                html: as_html(&block.body),
            })
            .collect();

        Self {
            uid: post.uid.clone(),
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            author: post.author.clone(),
            banner_url: post.banner_url.clone(),
            date: formatter.format_optional(post.first_publication_date.as_ref()),
            edited: formatter.edited_annotation(
                post.first_publication_date.as_ref(),
                post.last_publication_date.as_ref(),
            ),
            minutes: reading_minutes(post),
            blocks,
            previous: NavPostData::from_adjacent(previous),
            next: NavPostData::from_adjacent(next),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ErrorData<'a> {
    status: u16,
    message: &'a str,
}

fn post_href(uid: &str) -> String {
    link_resolver(&DocumentType::Posts, Some(uid)).unwrap_or_else(|| "/".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentBlock;
    use chrono::{TimeZone, Utc};

    fn document() -> PostDocument {
        PostDocument {
            uid: "como-utilizar-hooks".into(),
            first_publication_date: Some(Utc.with_ymd_and_hms(2021, 3, 15, 19, 25, 28).unwrap()),
            last_publication_date: Some(Utc.with_ymd_and_hms(2021, 3, 25, 19, 27, 35).unwrap()),
            title: "Como utilizar Hooks".into(),
            subtitle: "Pensando em sincronização".into(),
            author: "Joseph Oliveira".into(),
            banner_url: Some("https://images.example.com/banner.png".into()),
            content: Some(vec![ContentBlock::new("Intro", &["one two <three>"])]),
        }
    }

    #[test]
    fn test_post_card() {
        let card = PostCardData::from_summary(&document().summary(), &DateFormatter::default());
        assert_eq!(card.href, "/post/como-utilizar-hooks");
        assert_eq!(card.date, "15 mar 2021");
    }

    #[test]
    fn test_nav_post() {
        assert_eq!(NavPostData::from_adjacent(&AdjacentPost::none()), None);
        let nav = NavPostData::from_adjacent(&AdjacentPost {
            uid: Some("older".into()),
            title: None,
        })
        .unwrap();
        assert_eq!(nav.href, "/post/older");
        assert_eq!(nav.title, "older");
    }

    #[test]
    fn test_post_page_data() {
        let previous = AdjacentPost {
            uid: Some("older".into()),
            title: Some("Older".into()),
        };
        let page = PostPageData::build(
            &document(),
            &previous,
            &AdjacentPost::none(),
            &DateFormatter::default(),
        );
        assert_eq!(page.minutes, 1);
        assert_eq!(page.date, "15 mar 2021");
        assert_eq!(page.edited.as_deref(), Some("25 mar 2021, às 19:27"));
        assert_eq!(page.blocks[0].html, "<p>one two &lt;three&gt;</p>");
        assert!(page.previous.is_some());
        assert!(page.next.is_none());
    }

    #[test]
    fn test_post_page_without_content() {
        let mut post = document();
        post.content = None;
        let page = PostPageData::build(
            &post,
            &AdjacentPost::none(),
            &AdjacentPost::none(),
            &DateFormatter::default(),
        );
        assert_eq!(page.minutes, 0);
        assert!(page.blocks.is_empty());
    }

    #[test]
    fn test_labels_are_rendered() {
        let sources = [
            include_str!("blog/layout.html"),
            include_str!("blog/index.html"),
            include_str!("blog/post.html"),
        ]
        .concat();
        let labels = serde_json::to_value(crate::i18n::Locale::PtBr.labels()).unwrap();
        for key in labels.as_object().unwrap().keys() {
            // handed to error.html as the message
            if key == "not_found" || key == "could_not_load" {
                continue;
            }
            assert!(
                sources.contains(&format!("site.labels.{}", key)),
                "label {} is never rendered",
                key
            );
        }
    }

    #[test]
    fn test_card_href_stays_inside_attribute() {
        let renderer = TemplateRenderer::new().unwrap();
        let site = SiteData::new(&BlogConfig::default(), false);
        let mut summary = document().summary();
        summary.uid = r#"x" onmouseover="alert(1)"#.into();

        let index = IndexData {
            posts: vec![PostCardData::from_summary(&summary, &DateFormatter::default())],
            more_href: None,
        };
        let html = renderer.render_index(&site, &index).unwrap();
        assert!(html.contains(r#"href="/post/x%22%20onmouseover=%22alert(1)""#));
        assert!(!html.contains("onmouseover=\"alert"));
    }

    #[test]
    fn test_render_pages() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = BlogConfig::default();
        let site = SiteData::new(&config, true);
        let formatter = DateFormatter::default();

        let index = IndexData {
            posts: vec![PostCardData::from_summary(&document().summary(), &formatter)],
            more_href: Some("/page/2/".into()),
        };
        let html = renderer.render_index(&site, &index).unwrap();
        assert!(html.contains(r#"href="/post/como-utilizar-hooks""#));
        assert!(html.contains("Carregar mais posts"));
        assert!(html.contains("Sair do modo Preview"));

        let page = PostPageData::build(
            &document(),
            &AdjacentPost::none(),
            &AdjacentPost::none(),
            &formatter,
        );
        let comments = CommentsConfig {
            repo: "owner/comments".into(),
            ..Default::default()
        };
        let html = renderer.render_post(&site, &page, Some(&comments)).unwrap();
        assert!(html.contains("1 min"));
        assert!(html.contains("* editado em 25 mar 2021, às 19:27"));
        assert!(html.contains("<p>one two &lt;three&gt;</p>"));
        assert!(html.contains(r#"repo="owner&#x2F;comments""#));
        assert!(!html.contains("Post anterior"));

        let html = renderer.render_error(&site, 404, "Post não encontrado").unwrap();
        assert!(html.contains("404"));
    }

    #[test]
    fn test_render_last_page_has_no_more_link() {
        let renderer = TemplateRenderer::new().unwrap();
        let site = SiteData::new(&BlogConfig::default(), false);
        let index = IndexData {
            posts: Vec::new(),
            more_href: None,
        };
        let html = renderer.render_index(&site, &index).unwrap();
        assert!(!html.contains("Carregar mais posts"));
        assert!(!html.contains("Sair do modo Preview"));
    }
}

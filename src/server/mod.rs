//! Server rendering pages on request, with preview support

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::{BlogConfig, CommentsConfig};
use crate::content::{ContentAdapter, ContentApi};
use crate::error::ContentError;
use crate::helpers::DateFormatter;
use crate::templates::{PostCardData, SiteData, TemplateRenderer};
use crate::view;
use crate::Blog;

/// Cookie holding the preview ref set by the CMS
pub const PREVIEW_COOKIE: &str = "io.prismic.preview";

/// Server state shared by all handlers
pub struct AppState<A> {
    adapter: ContentAdapter<A>,
    renderer: TemplateRenderer,
    formatter: DateFormatter,
    config: BlogConfig,
}

impl<A: ContentApi> AppState<A> {
    pub fn new(blog: &Blog, adapter: ContentAdapter<A>) -> Result<Self> {
        Ok(Self {
            adapter,
            renderer: TemplateRenderer::new()?,
            formatter: blog.formatter(),
            config: blog.config.clone(),
        })
    }

    pub fn adapter(&self) -> &ContentAdapter<A> {
        &self.adapter
    }

    /// The adapter for one request: the published content, or the preview
    /// snapshot named by the request's cookie
    fn request_adapter(&self, headers: &HeaderMap) -> ContentAdapter<A> {
        self.adapter.with_preview_ref(preview_ref_from_headers(headers))
    }

    fn site(&self, adapter: &ContentAdapter<A>) -> SiteData {
        SiteData::new(&self.config, adapter.is_preview())
    }

    fn comments(&self) -> Option<&CommentsConfig> {
        self.config.comments.as_ref()
    }

    fn html(&self, status: StatusCode, rendered: Result<String>) -> Response {
        match rendered {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render page: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Render error").into_response()
            }
        }
    }

    fn error_page(&self, site: &SiteData, status: StatusCode, message: &str) -> Response {
        let rendered = self.renderer.render_error(site, status.as_u16(), message);
        self.html(status, rendered)
    }

    /// Not-found page for `NotFound`, "could not load" page otherwise
    fn content_error(&self, site: &SiteData, err: ContentError) -> Response {
        if err.is_not_found() {
            tracing::debug!("{}", err);
            self.error_page(site, StatusCode::NOT_FOUND, site.labels.not_found)
        } else {
            tracing::warn!("{}", err);
            self.error_page(site, StatusCode::BAD_GATEWAY, site.labels.could_not_load)
        }
    }
}

/// Build the application router
pub fn router<A: ContentApi + 'static>(state: Arc<AppState<A>>) -> Router {
    Router::new()
        .route("/", get(index_handler::<A>))
        .route("/page/:n", get(list_page_handler::<A>))
        .route("/page/:n/", get(list_page_handler::<A>))
        .route("/post/:uid", get(post_handler::<A>))
        .route("/post/:uid/", get(post_handler::<A>))
        .route("/api/more", get(more_handler::<A>))
        .route("/api/exit-preview", get(exit_preview_handler))
        .fallback(not_found_handler::<A>)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(blog, blog.adapter(None)?)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Read the preview ref from the request cookies.
///
/// The cookie is either the ref itself or a percent-encoded JSON object
/// whose entries carry it under `preview`.
pub fn preview_ref_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == PREVIEW_COOKIE)
        .and_then(|(_, value)| parse_preview_cookie(value))
}

fn parse_preview_cookie(value: &str) -> Option<String> {
    let decoded = percent_decode_str(value).decode_utf8().ok()?;
    let reference = match serde_json::from_str::<Value>(&decoded) {
        Ok(Value::Object(entries)) => entries
            .values()
            .find_map(|entry| entry.get("preview")?.as_str().map(str::to_string))?,
        _ => decoded.into_owned(),
    };
    Some(reference).filter(|r| !r.trim().is_empty())
}

async fn index_handler<A: ContentApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
    headers: HeaderMap,
) -> Response {
    render_list(&state, &headers, 1).await
}

async fn list_page_handler<A: ContentApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
    Path(n): Path<usize>,
    headers: HeaderMap,
) -> Response {
    render_list(&state, &headers, n).await
}

/// The list as it looks after `pages - 1` clicks on "load more"
async fn render_list<A: ContentApi>(
    state: &AppState<A>,
    headers: &HeaderMap,
    pages: usize,
) -> Response {
    let adapter = state.request_adapter(headers);
    let site = state.site(&adapter);
    if pages == 0 {
        return state.error_page(&site, StatusCode::NOT_FOUND, site.labels.not_found);
    }

    match view::post_list(&adapter, state.config.page_size, pages).await {
        Ok(list) => {
            let index = view::index_data(&list, &state.formatter, || {
                view::list_page_href(pages + 1)
            });
            let rendered = state.renderer.render_index(&site, &index);
            state.html(StatusCode::OK, rendered)
        }
        Err(e) => state.content_error(&site, e),
    }
}

async fn post_handler<A: ContentApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
    Path(uid): Path<String>,
    headers: HeaderMap,
) -> Response {
    let adapter = state.request_adapter(&headers);
    let site = state.site(&adapter);

    match view::post_page(&adapter, &state.formatter, &uid).await {
        Ok(page) => {
            let rendered = state.renderer.render_post(&site, &page, state.comments());
            state.html(StatusCode::OK, rendered)
        }
        Err(e) => state.content_error(&site, e),
    }
}

#[derive(Debug, Deserialize)]
struct MoreParams {
    cursor: String,
}

/// Body of the "load more" endpoint
#[derive(Debug, Serialize)]
struct MoreResponse {
    posts: Vec<PostCardData>,
    next_page: Option<String>,
}

async fn more_handler<A: ContentApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
    Query(params): Query<MoreParams>,
    headers: HeaderMap,
) -> Response {
    let adapter = state.request_adapter(&headers);

    match adapter.fetch_next_page(&params.cursor).await {
        Ok(page) => Json(MoreResponse {
            posts: page
                .posts
                .iter()
                .map(|summary| PostCardData::from_summary(summary, &state.formatter))
                .collect(),
            next_page: page.next_page,
        })
        .into_response(),
        Err(e) => {
            tracing::warn!("Load more failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Drop the preview cookie and go back to the published site
async fn exit_preview_handler() -> impl IntoResponse {
    (
        [(
            header::SET_COOKIE,
            format!("{}=; Path=/; Max-Age=0", PREVIEW_COOKIE),
        )],
        Redirect::to("/"),
    )
}

async fn not_found_handler<A: ContentApi + 'static>(
    State(state): State<Arc<AppState<A>>>,
    headers: HeaderMap,
) -> Response {
    let site = state.site(&state.request_adapter(&headers));
    state.error_page(&site, StatusCode::NOT_FOUND, site.labels.not_found)
}

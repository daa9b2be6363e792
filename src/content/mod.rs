//! Content module - reads posts from the headless content API

mod adapter;
pub mod api;
pub mod client;
pub mod link;
#[cfg(test)]
pub(crate) mod mock;
mod post;
pub mod predicate;
pub mod raw;

pub use adapter::ContentAdapter;
pub use api::ContentApi;
pub use client::PrismicClient;
pub use link::{link_resolver, DocumentType};
pub use post::{
    AdjacentPost, BlockKind, ContentBlock, PostDocument, PostPage, PostSummary, RichTextBlock,
    Span, SpanKind,
};

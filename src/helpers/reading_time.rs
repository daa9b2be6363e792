//! Reading-time estimation

use lazy_static::lazy_static;
use regex::Regex;

use crate::content::{ContentBlock, PostDocument};

/// Reading speed used by the estimate
pub const WORDS_PER_MINUTE: usize = 200;

lazy_static! {
    /// Spaces, slashes and periods separate fragments
    static ref FRAGMENT_SEPARATOR: Regex = Regex::new(r"[ /.]").unwrap();
}

/// Split a text into fragments, dropping whitespace-only pieces
pub fn text_fragments(text: &str) -> impl Iterator<Item = &str> {
    FRAGMENT_SEPARATOR
        .split(text)
        .filter(|fragment| fragment.chars().any(|c| !c.is_whitespace()))
}

/// Estimate reading time in minutes.
///
/// Each heading counts as many units as it has characters. Body fragments
/// accumulate across blocks, and every block adds its heading plus the
/// fragment count accumulated so far to the running total. The result is
/// `ceil(total / WORDS_PER_MINUTE)` after the last block.
pub fn estimate_reading_minutes(content: &[ContentBlock]) -> u32 {
    let mut fragments = 0;
    let mut total = 0;
    let mut minutes = 0;

    for block in content {
        let heading = block.heading.chars().count();
        fragments += block
            .body
            .iter()
            .map(|entry| text_fragments(&entry.text).count())
            .sum::<usize>();

        total += heading + fragments;
        minutes = total.div_ceil(WORDS_PER_MINUTE);
    }

    minutes as u32
}

/// Reading time of a post; 0 when its content is missing
pub fn reading_minutes(post: &PostDocument) -> u32 {
    match post.blocks() {
        Ok(blocks) => estimate_reading_minutes(blocks),
        Err(e) => {
            tracing::warn!("{}; reading time defaults to 0", e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content() {
        assert_eq!(estimate_reading_minutes(&[]), 0);
    }

    #[test]
    fn test_single_block() {
        // 5 heading characters + 3 fragments = 8 -> 1 minute
        let content = [ContentBlock::new("Intro", &["one two three"])];
        assert_eq!(estimate_reading_minutes(&content), 1);
    }

    #[test]
    fn test_fragment_separators() {
        let fragments: Vec<_> = text_fragments("a.b/c  d").collect();
        assert_eq!(fragments, ["a", "b", "c", "d"]);

        assert_eq!(text_fragments("   ").count(), 0);
        assert_eq!(text_fragments("").count(), 0);
        assert_eq!(text_fragments("end. ").count(), 1);
        assert_eq!(text_fragments("tab\tseparated").count(), 1);
    }

    #[test]
    fn test_heading_counts_characters() {
        // 200 heading characters and no body -> exactly 1 minute
        let heading = "x".repeat(200);
        assert_eq!(estimate_reading_minutes(&[ContentBlock::new(&heading, &[])]), 1);

        let heading = "x".repeat(201);
        assert_eq!(estimate_reading_minutes(&[ContentBlock::new(&heading, &[])]), 2);

        // characters, not bytes
        let heading = "ç".repeat(200);
        assert_eq!(estimate_reading_minutes(&[ContentBlock::new(&heading, &[])]), 1);
    }

    #[test]
    fn test_fragments_accumulate_across_blocks() {
        // block 1: 0 + 150 -> total 150
        // block 2: 0 + (150 + 10) -> total 310 -> 2 minutes
        let long = vec!["word"; 150].join(" ");
        let short = vec!["word"; 10].join(" ");
        let content = [
            ContentBlock::new("", &[long.as_str()]),
            ContentBlock::new("", &[short.as_str()]),
        ];
        assert_eq!(estimate_reading_minutes(&content), 2);

        // a single block with the same 160 fragments stays under 1 minute
        let both = format!("{} {}", long, short);
        let single = [ContentBlock::new("", &[both.as_str()])];
        assert_eq!(estimate_reading_minutes(&single), 1);
    }

    #[test]
    fn test_monotonic_when_appending_blocks() {
        let blocks = [
            ContentBlock::new("Proin et varius", &["Lorem ipsum dolor sit amet."]),
            ContentBlock::new("", &[]),
            ContentBlock::new("Cras laoreet", &["Nullam dolor sapien, vulputate eu diam at"]),
            ContentBlock::new("x", &["   ", "a/b/c"]),
        ];

        let mut previous = 0;
        for len in 0..=blocks.len() {
            let minutes = estimate_reading_minutes(&blocks[..len]);
            assert!(minutes >= previous);
            previous = minutes;
        }
    }

    #[test]
    fn test_missing_content_reads_as_zero() {
        let post = PostDocument {
            uid: "draft".into(),
            first_publication_date: None,
            last_publication_date: None,
            title: "Draft".into(),
            subtitle: String::new(),
            author: String::new(),
            banner_url: None,
            content: None,
        };
        assert_eq!(reading_minutes(&post), 0);
    }
}

//! Render structured text blocks as HTML

use crate::content::{BlockKind, RichTextBlock, Span, SpanKind};

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a body as HTML, grouping consecutive list items
pub fn as_html(blocks: &[RichTextBlock]) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in blocks {
        let list_tag = match block.kind {
            BlockKind::ListItem => Some("ul"),
            BlockKind::OrderedListItem => Some("ol"),
            _ => None,
        };

        if open_list != list_tag {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list_tag {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list_tag;
        }

        let inner = render_spans(&block.text, &block.spans);
        match &block.kind {
            BlockKind::Paragraph | BlockKind::Other(_) => {
                html.push_str(&format!("<p>{}</p>", inner));
            }
            BlockKind::Heading(level) => {
                html.push_str(&format!("<h{0}>{1}</h{0}>", level, inner));
            }
            BlockKind::ListItem | BlockKind::OrderedListItem => {
                html.push_str(&format!("<li>{}</li>", inner));
            }
            BlockKind::Preformatted => {
                html.push_str(&format!("<pre>{}</pre>", inner));
            }
        }
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    html
}

fn open_tag(span: &Span) -> String {
    match &span.kind {
        SpanKind::Strong => "<strong>".to_string(),
        SpanKind::Em => "<em>".to_string(),
        SpanKind::Hyperlink(url) => format!(
            r#"<a href="{}" target="_blank" rel="noopener">"#,
            escape_html(url)
        ),
        SpanKind::Label(label) => format!(r#"<span class="{}">"#, escape_html(label)),
        SpanKind::Other(_) => "<span>".to_string(),
    }
}

fn close_tag(span: &Span) -> &'static str {
    match span.kind {
        SpanKind::Strong => "</strong>",
        SpanKind::Em => "</em>",
        SpanKind::Hyperlink(_) => "</a>",
        SpanKind::Label(_) | SpanKind::Other(_) => "</span>",
    }
}

/// Apply spans over a text. Overlapping spans are closed and reopened so
/// the output stays well nested.
fn render_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut open: Vec<&Span> = Vec::new();

    for i in 0..=chars.len() {
        if let Some(lowest) = open.iter().position(|span| span.end <= i) {
            let above = open.split_off(lowest);
            for span in above.iter().rev() {
                out.push_str(close_tag(span));
            }
            for span in above.into_iter().filter(|span| span.end > i) {
                out.push_str(&open_tag(span));
                open.push(span);
            }
        }

        let Some(&c) = chars.get(i) else {
            break;
        };

        let mut starting: Vec<&Span> = spans
            .iter()
            .filter(|span| span.start == i && span.end > span.start)
            .collect();
        starting.sort_by(|a, b| b.end.cmp(&a.end));
        for span in starting {
            out.push_str(&open_tag(span));
            open.push(span);
        }

        match c {
            '\n' => out.push_str("<br />"),
            c => out.push_str(&escape_html(&c.to_string())),
        }
    }

    for span in open.iter().rev() {
        out.push_str(close_tag(span));
    }

    out
}

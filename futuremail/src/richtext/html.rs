//! HTML rendering and markup stripping

use std::fmt::Write;

use super::document::{Block, BlockKind, Document, Run};

/// Escape text content
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value
#[must_use]
pub fn escape_attr(value: &str) -> String {
    escape_text(value)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the document as HTML
///
/// Consecutive list items of the same kind share one `<ul>`/`<ol>`. An empty
/// block renders as `<br>` so it keeps its height; an empty document renders
/// as the empty string.
#[must_use]
pub fn render(doc: &Document) -> String {
    if doc.is_empty() {
        return String::new();
    }

    let mut html = String::new();
    let mut open_list: Option<BlockKind> = None;

    for block in doc.blocks() {
        if open_list.is_some_and(|kind| kind != block.kind) {
            close_list(&mut html, open_list.take());
        }
        match block.kind {
            BlockKind::Paragraph => {
                html.push_str("<p>");
                render_inline(&mut html, block);
                html.push_str("</p>");
            }
            BlockKind::BulletItem | BlockKind::NumberedItem => {
                if open_list.is_none() {
                    html.push_str(list_tag(block.kind).0);
                    open_list = Some(block.kind);
                }
                html.push_str("<li>");
                render_inline(&mut html, block);
                html.push_str("</li>");
            }
        }
    }
    close_list(&mut html, open_list);
    html
}

const fn list_tag(kind: BlockKind) -> (&'static str, &'static str) {
    match kind {
        BlockKind::NumberedItem => ("<ol>", "</ol>"),
        BlockKind::BulletItem | BlockKind::Paragraph => ("<ul>", "</ul>"),
    }
}

fn close_list(html: &mut String, kind: Option<BlockKind>) {
    if let Some(kind) = kind {
        html.push_str(list_tag(kind).1);
    }
}

fn render_inline(html: &mut String, block: &Block) {
    if block.is_empty() {
        html.push_str("<br>");
        return;
    }
    for run in &block.runs {
        render_run(html, run);
    }
}

fn render_run(html: &mut String, run: &Run) {
    let marks = run.style.marks;
    if let Some(href) = &run.style.link {
        let _ = write!(html, r#"<a href="{}">"#, escape_attr(href));
    }
    if marks.bold {
        html.push_str("<strong>");
    }
    if marks.italic {
        html.push_str("<em>");
    }
    if marks.underline {
        html.push_str("<u>");
    }
    html.push_str(&escape_text(&run.text));
    if marks.underline {
        html.push_str("</u>");
    }
    if marks.italic {
        html.push_str("</em>");
    }
    if marks.bold {
        html.push_str("</strong>");
    }
    if run.style.link.is_some() {
        html.push_str("</a>");
    }
}

/// Text content of an HTML fragment
///
/// Drops every tag (comments included) and decodes character references,
/// the same text a browser exposes as `textContent`.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(c) = rest.chars().next() {
        match c {
            '<' => {
                let close = if rest.starts_with("<!--") { "-->" } else { ">" };
                rest = rest
                    .find(close)
                    .map_or("", |end| &rest[end + close.len()..]);
            }
            '&' => {
                let (decoded, consumed) = decode_entity(rest);
                text.push_str(&decoded);
                rest = &rest[consumed..];
            }
            _ => {
                text.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    text
}

/// Length of the visible text in chars, used for the character counter
#[must_use]
pub fn text_length(html: &str) -> usize {
    strip_tags(html).chars().count()
}

/// Whether the fragment shows any non-whitespace text
#[must_use]
pub fn has_visible_text(html: &str) -> bool {
    !strip_tags(html).trim().is_empty()
}

fn decode_entity(input: &str) -> (String, usize) {
    let Some(end) = input.find(';').filter(|end| *end <= 10) else {
        return ("&".to_string(), 1);
    };
    let name = &input[1..end];
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => name.strip_prefix('#').and_then(|code| {
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => code.parse().ok(),
            };
            value.and_then(char::from_u32)
        }),
    };
    decoded.map_or_else(|| ("&".to_string(), 1), |c| (c.to_string(), end + 1))
}

//! Inline tokenizer.
//!
//! Text is split in a fixed order: code spans, bold, italic, images, links.
//! Each stage only touches plain-text nodes left by the stages before it, so
//! reordering the stages changes the output for text mixing markers.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::inline::{InlineKind, InlineNode};

/// Matches `![alt](url)`
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// Matches `[label](url)`; callers must reject matches preceded by `!`
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// Delimiter stages, applied in this order before literal extraction.
const DELIMITERS: [(&str, InlineKind); 3] = [
    ("`", InlineKind::Code),
    ("**", InlineKind::Bold),
    ("_", InlineKind::Italic),
];

/// Convert a run of inline Markdown into formatted spans.
pub fn tokenize(text: &str) -> Result<Vec<InlineNode>> {
    let mut nodes = vec![InlineNode::text(text)];
    for (delimiter, kind) in DELIMITERS {
        nodes = split_by_delimiter(nodes, delimiter, kind)?;
    }
    nodes = split_images(nodes);
    nodes = split_links(nodes);
    Ok(nodes)
}

/// Split every plain-text node on `delimiter`, tagging the enclosed
/// segments with `kind`.
///
/// Empty segments are dropped. An odd number of delimiters means one was
/// never closed and fails with [`Error::MalformedMarkdown`].
pub fn split_by_delimiter(
    nodes: Vec<InlineNode>,
    delimiter: &str,
    kind: InlineKind,
) -> Result<Vec<InlineNode>> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        if !node.is_plain() {
            out.push(node);
            continue;
        }

        let segments: Vec<&str> = node.as_text().split(delimiter).collect();
        if segments.len() % 2 == 0 {
            return Err(Error::MalformedMarkdown {
                delimiter: delimiter.to_string(),
                text: node.as_text().to_string(),
            });
        }

        for (i, segment) in segments.into_iter().enumerate() {
            if segment.is_empty() {
                continue;
            }
            if i % 2 == 0 {
                out.push(InlineNode::text(segment));
            } else {
                out.push(formatted(segment, kind));
            }
        }
    }
    Ok(out)
}

fn formatted(text: &str, kind: InlineKind) -> InlineNode {
    match kind {
        InlineKind::Code => InlineNode::code(text),
        InlineKind::Bold => InlineNode::bold(text),
        InlineKind::Italic => InlineNode::italic(text),
        _ => InlineNode::text(text),
    }
}

/// All `(alt, url)` pairs of image literals in `text`, left to right.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    IMAGE_RE
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// All `(label, url)` pairs of link literals in `text`, skipping images.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    LINK_RE
        .captures_iter(text)
        .filter(|caps| {
            let start = caps.get(0).map_or(0, |m| m.start());
            !text[..start].ends_with('!')
        })
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Pull image literals out of plain-text nodes.
pub fn split_images(nodes: Vec<InlineNode>) -> Vec<InlineNode> {
    split_literals(nodes, Literal::Image)
}

/// Pull link literals out of plain-text nodes.
pub fn split_links(nodes: Vec<InlineNode>) -> Vec<InlineNode> {
    split_literals(nodes, Literal::Link)
}

#[derive(Clone, Copy)]
enum Literal {
    Image,
    Link,
}

impl Literal {
    fn extract(self, text: &str) -> Vec<(String, String)> {
        match self {
            Literal::Image => extract_images(text),
            Literal::Link => extract_links(text),
        }
    }

    fn source(self, label: &str, url: &str) -> String {
        match self {
            Literal::Image => format!("![{label}]({url})"),
            Literal::Link => format!("[{label}]({url})"),
        }
    }

    fn node(self, label: String, url: String) -> InlineNode {
        match self {
            Literal::Image => InlineNode::image(label, url),
            Literal::Link => InlineNode::link(label, url),
        }
    }
}

fn split_literals(nodes: Vec<InlineNode>, literal: Literal) -> Vec<InlineNode> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        if !node.is_plain() {
            out.push(node);
            continue;
        }

        let matches = literal.extract(node.as_text());
        if matches.is_empty() {
            out.push(node);
            continue;
        }

        let mut remaining = node.as_text();
        for (label, url) in matches {
            let source = literal.source(&label, &url);
            let Some((before, after)) = remaining.split_once(source.as_str()) else {
                tracing::debug!(literal = %source, "literal not found in remaining text");
                break;
            };
            if !before.is_empty() {
                out.push(InlineNode::text(before));
            }
            out.push(literal.node(label, url));
            remaining = after;
        }
        if !remaining.is_empty() {
            out.push(InlineNode::text(remaining));
        }
    }
    out
}

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::node::{LeafNode, RenderNode};

/// The formatting carried by a run of inline text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineKind {
    PlainText,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl InlineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InlineKind::PlainText => "text",
            InlineKind::Bold => "bold",
            InlineKind::Italic => "italic",
            InlineKind::Code => "code",
            InlineKind::Link => "link",
            InlineKind::Image => "image",
        }
    }

    /// Links and images are the only kinds that carry a target URL.
    pub fn has_url(self) -> bool {
        matches!(self, InlineKind::Link | InlineKind::Image)
    }
}

impl FromStr for InlineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(InlineKind::PlainText),
            "bold" => Ok(InlineKind::Bold),
            "italic" => Ok(InlineKind::Italic),
            "code" => Ok(InlineKind::Code),
            "link" => Ok(InlineKind::Link),
            "image" => Ok(InlineKind::Image),
            other => Err(Error::Validation(format!("unknown inline kind {other:?}"))),
        }
    }
}

impl fmt::Display for InlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable run of inline text with a single formatting kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineNode {
    text: String,
    kind: InlineKind,
    url: Option<String>,
}

impl InlineNode {
    /// Build a node, checking that `url` is present exactly when `kind` needs one.
    pub fn new(text: impl Into<String>, kind: InlineKind, url: Option<String>) -> Result<Self> {
        match (kind.has_url(), url.is_some()) {
            (true, false) => Err(Error::Validation(format!("{kind} node requires a url"))),
            (false, true) => Err(Error::Validation(format!("{kind} node cannot carry a url"))),
            _ => Ok(Self {
                text: text.into(),
                kind,
                url,
            }),
        }
    }

    /// Build a node from a raw kind name such as `"bold"` or `"image"`.
    pub fn parse(text: impl Into<String>, kind: &str, url: Option<String>) -> Result<Self> {
        Self::new(text, kind.parse()?, url)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::formatted(text, InlineKind::PlainText)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::formatted(text, InlineKind::Bold)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::formatted(text, InlineKind::Italic)
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::formatted(text, InlineKind::Code)
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: label.into(),
            kind: InlineKind::Link,
            url: Some(url.into()),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: alt.into(),
            kind: InlineKind::Image,
            url: Some(url.into()),
        }
    }

    fn formatted(text: impl Into<String>, kind: InlineKind) -> Self {
        Self {
            text: text.into(),
            kind,
            url: None,
        }
    }

    pub fn as_text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> InlineKind {
        self.kind
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_plain(&self) -> bool {
        self.kind == InlineKind::PlainText
    }

    /// Map this span onto the leaf that renders it.
    pub fn to_render_node(&self) -> RenderNode {
        let url = self.url.clone().unwrap_or_default();
        let leaf = match self.kind {
            InlineKind::PlainText => LeafNode::untagged(self.text.clone()),
            InlineKind::Bold => LeafNode::new("b", self.text.clone()),
            InlineKind::Italic => LeafNode::new("i", self.text.clone()),
            InlineKind::Code => LeafNode::new("code", self.text.clone()),
            InlineKind::Link => LeafNode::new("a", self.text.clone()).with_attribute("href", url),
            InlineKind::Image => LeafNode::new("img", "")
                .with_attribute("src", url)
                .with_attribute("alt", self.text.clone()),
        };
        RenderNode::Leaf(leaf)
    }
}

impl fmt::Display for InlineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InlineNode({}, {}, {})",
            self.text,
            self.kind,
            self.url.as_deref().unwrap_or("None")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equal_when_all_fields_match() {
        assert_eq!(InlineNode::bold("a text node"), InlineNode::bold("a text node"));
        assert_ne!(InlineNode::bold("a text node"), InlineNode::code("a text node"));
        assert_ne!(InlineNode::link("link", "http://a"), InlineNode::link("link", "http://b"));
    }

    #[test]
    fn raw_kind_matches_variant() {
        let parsed = InlineNode::parse("t", "image", Some("u".to_string())).unwrap();
        assert_eq!(parsed, InlineNode::image("t", "u"));
        assert_eq!(parsed.kind(), InlineKind::Image);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = InlineNode::parse("t", "not-a-type", None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn url_required_only_for_links_and_images() {
        assert!(InlineNode::new("x", InlineKind::Link, None).is_err());
        assert!(InlineNode::new("x", InlineKind::Bold, Some("u".into())).is_err());
        assert_eq!(
            InlineNode::new("x", InlineKind::Link, Some("http://x".into())).unwrap(),
            InlineNode::link("x", "http://x")
        );
    }

    #[test]
    fn display_format() {
        assert_eq!(InlineNode::link("hi", "u").to_string(), "InlineNode(hi, link, u)");
        assert_eq!(InlineNode::code("hi").to_string(), "InlineNode(hi, code, None)");
    }

    #[test]
    fn plain_text_renders_unwrapped() {
        let node = InlineNode::text("This is a text node").to_render_node();
        assert_eq!(node.tag(), None);
        assert_eq!(node.render().unwrap(), "This is a text node");
    }

    #[test]
    fn formatted_kinds_render_with_tags() {
        let render = |node: InlineNode| node.to_render_node().render().unwrap();
        assert_eq!(render(InlineNode::bold("b")), "<b>b</b>");
        assert_eq!(render(InlineNode::italic("italics")), "<i>italics</i>");
        assert_eq!(render(InlineNode::code("fmt")), "<code>fmt</code>");
        assert_eq!(
            render(InlineNode::link("click", "http://a")),
            r#"<a href="http://a">click</a>"#
        );
    }

    #[test]
    fn image_renders_empty_value_with_src_and_alt() {
        let node = InlineNode::image("alt text", "http://img").to_render_node();
        let RenderNode::Leaf(leaf) = &node else {
            panic!("expected a leaf");
        };
        assert_eq!(leaf.value(), Some(""));
        assert_eq!(
            leaf.attributes(),
            &[
                ("src".to_string(), "http://img".to_string()),
                ("alt".to_string(), "alt text".to_string()),
            ]
        );
        assert_eq!(
            node.render().unwrap(),
            r#"<img src="http://img" alt="alt text"></img>"#
        );
    }
}

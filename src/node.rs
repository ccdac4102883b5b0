//! Renderable HTML node tree.
//!
//! Leaves hold a literal value, parents own an ordered list of children.
//! Parents render their children but never their own attributes.

use crate::error::{Error, Result};

type Attributes = Vec<(String, String)>;

/// A node that can be serialized to HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    Leaf(LeafNode),
    Parent(ParentNode),
}

impl RenderNode {
    pub fn tag(&self) -> Option<&str> {
        match self {
            RenderNode::Leaf(leaf) => leaf.tag(),
            RenderNode::Parent(parent) => parent.tag(),
        }
    }

    pub fn render(&self) -> Result<String> {
        match self {
            RenderNode::Leaf(leaf) => leaf.render(),
            RenderNode::Parent(parent) => parent.render(),
        }
    }
}

impl From<LeafNode> for RenderNode {
    fn from(leaf: LeafNode) -> Self {
        RenderNode::Leaf(leaf)
    }
}

impl From<ParentNode> for RenderNode {
    fn from(parent: ParentNode) -> Self {
        RenderNode::Parent(parent)
    }
}

/// A node without children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafNode {
    tag: Option<String>,
    value: Option<String>,
    attributes: Attributes,
}

impl LeafNode {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attributes: Vec::new(),
        }
    }

    /// A leaf that renders as its bare value.
    pub fn untagged(value: impl Into<String>) -> Self {
        Self {
            tag: None,
            value: Some(value.into()),
            attributes: Vec::new(),
        }
    }

    /// A leaf with no value yet; rendering it fails.
    pub fn empty(tag: Option<String>) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        insert_attribute(&mut self.attributes, key.into(), value.into());
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn render_attributes(&self) -> String {
        render_attributes(&self.attributes)
    }

    pub fn render(&self) -> Result<String> {
        let value = self.value.as_deref().ok_or(Error::ValueMissing)?;
        match self.tag.as_deref() {
            None | Some("") => Ok(value.to_string()),
            Some(tag) => Ok(format!(
                "<{tag}{}>{value}</{tag}>",
                self.render_attributes()
            )),
        }
    }
}

/// A node whose content is the concatenation of its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentNode {
    tag: Option<String>,
    children: Vec<RenderNode>,
    attributes: Attributes,
}

impl ParentNode {
    pub fn new(tag: impl Into<String>, children: Vec<RenderNode>) -> Self {
        Self {
            tag: Some(tag.into()),
            children,
            attributes: Vec::new(),
        }
    }

    /// A parent with no tag; rendering it fails.
    pub fn untagged(children: Vec<RenderNode>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        insert_attribute(&mut self.attributes, key.into(), value.into());
        self
    }

    pub fn push(&mut self, child: impl Into<RenderNode>) {
        self.children.push(child.into());
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn children(&self) -> &[RenderNode] {
        &self.children
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn render_attributes(&self) -> String {
        render_attributes(&self.attributes)
    }

    pub fn render(&self) -> Result<String> {
        let tag = match self.tag.as_deref() {
            None | Some("") => {
                return Err(Error::Validation("parent node has no tag".to_string()));
            }
            Some(tag) => tag,
        };
        if self.children.is_empty() {
            return Err(Error::Validation(format!("<{tag}> has no children")));
        }

        let mut out = format!("<{tag}>");
        for child in &self.children {
            out.push_str(&child.render()?);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        Ok(out)
    }
}

/// Insert or overwrite `key`, keeping first-insertion order.
fn insert_attribute(attributes: &mut Attributes, key: String, value: String) {
    match attributes.iter_mut().find(|(k, _)| *k == key) {
        Some((_, existing)) => *existing = value,
        None => attributes.push((key, value)),
    }
}

fn render_attributes(attributes: &[(String, String)]) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!(" {key}=\"{value}\""))
        .collect()
}

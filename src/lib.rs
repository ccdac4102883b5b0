mod block;
mod config;
mod error;
mod html;
mod inline;
mod node;
pub mod site;
mod tokenize;

pub use block::{Block, BlockKind, classify, to_blocks};
pub use config::{Config, ConfigError, Markers};
pub use error::{Error, Result};
pub use html::build;
pub use inline::{InlineKind, InlineNode};
pub use node::{LeafNode, ParentNode, RenderNode};
pub use tokenize::{
    extract_images, extract_links, split_by_delimiter, split_images, split_links, tokenize,
};

/// Segment markdown text into classified blocks.
pub fn parse(markdown: &str) -> Vec<Block<'_>> {
    block::parse(markdown)
}

/// Convert markdown to an HTML fragment wrapped in a single `div`.
pub fn convert_markdown_to_html(markdown: &str) -> Result<String> {
    build(markdown)?.render()
}

/// The document title: the text of a leading `# ` heading.
pub fn extract_title(markdown: &str) -> Result<String> {
    html::extract_title(markdown)
}

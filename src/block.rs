use std::sync::LazyLock;

use regex::Regex;

/// Blocks are separated by exactly two consecutive newlines.
const BLOCK_SEPARATOR: &str = "\n\n";

const CODE_FENCE: &str = "```";

/// One to six `#`, a space, then the rest of a single line.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6} .*$").unwrap());

/// Structural kind of a top-level block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

/// A classified top-level block, borrowing its text from the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub kind: BlockKind,
    pub text: &'a str,
}

/// Segment and classify a whole document.
pub fn parse(document: &str) -> Vec<Block<'_>> {
    to_blocks(document)
        .into_iter()
        .map(|text| Block {
            kind: classify(text),
            text,
        })
        .collect()
}

/// Split a document into trimmed, non-empty blocks in source order.
pub fn to_blocks(document: &str) -> Vec<&str> {
    document
        .split(BLOCK_SEPARATOR)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Decide what kind of block `block` is. The first matching rule wins and
/// anything that only partially matches a rule is a paragraph.
pub fn classify(block: &str) -> BlockKind {
    if HEADING_RE.is_match(block) {
        return BlockKind::Heading;
    }
    if is_fenced(block) {
        return BlockKind::Code;
    }

    let lines: Vec<&str> = block.lines().collect();
    if every_content_line_starts_with(&lines, '>') {
        return BlockKind::Quote;
    }
    if every_content_line_starts_with(&lines, '-') {
        return BlockKind::UnorderedList;
    }
    if is_numbered(&lines) {
        return BlockKind::OrderedList;
    }
    BlockKind::Paragraph
}

/// Number of leading `#` characters in a heading block.
pub fn heading_level(block: &str) -> usize {
    block.chars().take_while(|&c| c == '#').count()
}

fn is_fenced(block: &str) -> bool {
    block.starts_with(CODE_FENCE) && block.ends_with(CODE_FENCE)
}

fn every_content_line_starts_with(lines: &[&str], marker: char) -> bool {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .all(|line| line.starts_with(marker))
}

/// Line `i` must start with `"{i}. "`, counting from 1 with no gaps.
fn is_numbered(lines: &[&str]) -> bool {
    lines
        .iter()
        .enumerate()
        .all(|(i, line)| line.starts_with(&ordered_prefix(i + 1)))
}

pub(crate) fn ordered_prefix(number: usize) -> String {
    format!("{number}. ")
}

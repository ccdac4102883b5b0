use crate::block::{self, Block, BlockKind};
use crate::error::{Error, Result};
use crate::node::{LeafNode, ParentNode, RenderNode};
use crate::tokenize::tokenize;

const TITLE_PREFIX: &str = "# ";

/// Build the render tree for a whole document: a `div` with one child per block.
pub fn build(document: &str) -> Result<ParentNode> {
    let mut root = ParentNode::new("div", Vec::new());
    for block in block::parse(document) {
        tracing::debug!(kind = ?block.kind, len = block.text.len(), "building block");
        root.push(block_to_node(block)?);
    }
    Ok(root)
}

/// The text of the leading `# ` heading, if the document starts with one.
pub fn extract_title(document: &str) -> Result<String> {
    block::to_blocks(document)
        .first()
        .and_then(|first| first.strip_prefix(TITLE_PREFIX))
        .map(|title| title.trim().to_string())
        .ok_or(Error::TitleNotFound)
}

fn block_to_node(block: Block<'_>) -> Result<RenderNode> {
    let text = block.text;
    let node: RenderNode = match block.kind {
        BlockKind::Paragraph => {
            let joined = text.lines().collect::<Vec<_>>().join(" ");
            ParentNode::new("p", inline_children(&joined)?).into()
        }
        BlockKind::Heading => heading_to_node(text),
        // Fences are kept in the rendered code.
        BlockKind::Code => {
            ParentNode::new("pre", vec![LeafNode::new("code", text).into()]).into()
        }
        BlockKind::Quote => {
            let joined = text
                .lines()
                .map(|line| {
                    let line = line.strip_prefix('>').unwrap_or(line);
                    let line = line.strip_prefix(' ').unwrap_or(line);
                    line.trim_end()
                })
                .collect::<Vec<_>>()
                .join(" ");
            ParentNode::new("blockquote", inline_children(&joined)?).into()
        }
        BlockKind::UnorderedList => {
            let items = text
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| list_item(line.trim_start_matches(['-', ' '])))
                .collect::<Result<Vec<_>>>()?;
            ParentNode::new("ul", items).into()
        }
        BlockKind::OrderedList => {
            let items = text
                .lines()
                .enumerate()
                .map(|(i, line)| {
                    let prefix = block::ordered_prefix(i + 1);
                    list_item(line.strip_prefix(prefix.as_str()).unwrap_or(line))
                })
                .collect::<Result<Vec<_>>>()?;
            ParentNode::new("ol", items).into()
        }
    };
    Ok(node)
}

/// Heading text is placed verbatim in the leaf, without inline formatting.
fn heading_to_node(text: &str) -> RenderNode {
    let level = block::heading_level(text);
    let content = text[level..].strip_prefix(' ').unwrap_or(&text[level..]);
    LeafNode::new(format!("h{level}"), content).into()
}

fn list_item(text: &str) -> Result<RenderNode> {
    Ok(ParentNode::new("li", inline_children(text)?).into())
}

fn inline_children(text: &str) -> Result<Vec<RenderNode>> {
    Ok(tokenize(text)?
        .iter()
        .map(|node| node.to_render_node())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(document: &str) -> String {
        build(document).unwrap().render().unwrap()
    }

    fn child_tags(root: &ParentNode) -> Vec<&str> {
        root.children().iter().filter_map(RenderNode::tag).collect()
    }

    #[test]
    fn title_and_paragraph() {
        let document = "# Title\n\nHello **world**";
        assert_eq!(
            render(document),
            "<div><h1>Title</h1><p>Hello <b>world</b></p></div>"
        );
        assert_eq!(extract_title(document).unwrap(), "Title");
    }

    #[test]
    fn backtick_only_blocks_are_code() {
        assert_eq!(render("```"), "<div><pre><code>```</code></pre></div>");
        assert_eq!(render("````"), "<div><pre><code>````</code></pre></div>");
        assert_eq!(
            render("intro\n\n`````"),
            "<div><p>intro</p><pre><code>`````</code></pre></div>"
        );
    }

    #[test]
    fn paragraph_lines_are_joined() {
        assert_eq!(
            render("This is **bolded** paragraph\ntext in a p\ntag here"),
            "<div><p>This is <b>bolded</b> paragraph text in a p tag here</p></div>"
        );
    }

    #[test]
    fn heading_text_is_not_formatted() {
        assert_eq!(
            render("### A **bold** claim"),
            "<div><h3>A **bold** claim</h3></div>"
        );
    }

    #[test]
    fn code_block_keeps_fences() {
        let root = build("```print('hello')```").unwrap();
        let [RenderNode::Parent(pre)] = root.children() else {
            panic!("expected a single pre block");
        };
        assert_eq!(pre.tag(), Some("pre"));
        assert_eq!(pre.children()[0].tag(), Some("code"));
        assert_eq!(
            pre.render().unwrap(),
            "<pre><code>```print('hello')```</code></pre>"
        );
    }

    #[test]
    fn multi_line_code_is_not_tokenized() {
        assert_eq!(
            render("```\nlet _x = **y**;\n```"),
            "<div><pre><code>```\nlet _x = **y**;\n```</code></pre></div>"
        );
    }

    #[test]
    fn quote_lines_are_joined() {
        assert_eq!(
            render("> This is a quote\n> with _two_ lines"),
            "<div><blockquote>This is a quote with <i>two</i> lines</blockquote></div>"
        );
    }

    #[test]
    fn unordered_list_items() {
        assert_eq!(
            render("- Item 1\n-  Item **2**"),
            "<div><ul><li>Item 1</li><li>Item <b>2</b></li></ul></div>"
        );
    }

    #[test]
    fn ordered_list_items() {
        assert_eq!(
            render("1. First\n2. [Second](/two)"),
            r#"<div><ol><li>First</li><li><a href="/two">Second</a></li></ol></div>"#
        );
    }

    #[test]
    fn blocks_keep_source_order() {
        let document = "# Heading\n\nParagraph\n\n```code block```\n\n> Quote\n\n- List1\n- List2";
        let root = build(document).unwrap();
        assert_eq!(root.tag(), Some("div"));
        assert_eq!(child_tags(&root), vec!["h1", "p", "pre", "blockquote", "ul"]);
    }

    #[test]
    fn empty_document_has_no_children() {
        let root = build("").unwrap();
        assert_eq!(root.tag(), Some("div"));
        assert!(root.children().is_empty());
        assert!(matches!(root.render(), Err(Error::Validation(_))));
    }

    #[test]
    fn malformed_inline_aborts_the_build() {
        assert!(matches!(
            build("# Fine\n\nthis **breaks"),
            Err(Error::MalformedMarkdown { .. })
        ));
    }

    #[test]
    fn title_from_first_block() {
        assert_eq!(
            extract_title("# Heading  \n\nParagraph\n\n```code block```").unwrap(),
            "Heading"
        );
    }

    #[test]
    fn title_requires_level_one_heading_first() {
        assert_eq!(extract_title("## Heading\n\nParagraph"), Err(Error::TitleNotFound));
        assert_eq!(extract_title("Intro\n\n# Late title"), Err(Error::TitleNotFound));
        assert_eq!(extract_title(""), Err(Error::TitleNotFound));
    }
}

//! Depth-first span extraction from the reference tree

use crate::config::RoleConfig;
use crate::error::{Result, SpanError};
use crate::positions::LineIndex;
use crate::refine::refine;
use crate::roles::Span;
use crate::tree::ParseNode;

/// Walks a reference tree and emits one span per recognized node.
pub struct Extractor<'a> {
    text: &'a str,
    index: LineIndex,
    roles: &'a RoleConfig,
}

impl<'a> Extractor<'a> {
    /// `text` must already be trailing-newline normalized.
    pub fn new(text: &'a str, roles: &'a RoleConfig) -> Self {
        Self {
            text,
            index: LineIndex::new(text),
            roles,
        }
    }

    pub fn extract(&self, root: &ParseNode) -> Result<Vec<Span>> {
        let mut spans = Vec::new();
        self.visit(root, &mut spans)?;
        Ok(spans)
    }

    fn visit(&self, node: &ParseNode, spans: &mut Vec<Span>) -> Result<()> {
        let role = match node.kind.role() {
            Some(role) if self.roles.is_enabled(&node.kind) => role,
            _ => {
                tracing::trace!(tag = node.kind.tag(), "walking through container");
                return self.visit_children(node, spans);
            }
        };

        let range = node.sourcepos.ok_or_else(|| SpanError::MissingSourcePos {
            tag: node.kind.tag().to_string(),
        })?;
        let (start, end) = self.index.resolve_range(range)?;
        let refined = refine(role, self.text, start, end);
        let span = Span::new(refined.role, refined.start, refined.end, self.text)?;
        spans.push(span);

        // List markers are only the start of an item; its content still
        // produces spans of its own.
        if refined.role.is_list() {
            self.visit_children(node, spans)?;
        }
        Ok(())
    }

    fn visit_children(&self, node: &ParseNode, spans: &mut Vec<Span>) -> Result<()> {
        for child in &node.children {
            self.visit(child, spans)?;
        }
        Ok(())
    }
}

/// Extract spans from `root` over `text` with the given kinds enabled.
pub fn extract_spans(root: &ParseNode, text: &str, roles: &RoleConfig) -> Result<Vec<Span>> {
    Extractor::new(text, roles).extract(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;
    use crate::tree::{parse_tree, NodeKind};

    fn node(kind: NodeKind, pos: &str) -> ParseNode {
        ParseNode::new(kind, Some(pos.parse().unwrap()))
    }

    fn container(tag: &str, children: Vec<ParseNode>) -> ParseNode {
        ParseNode::new(NodeKind::Opaque(tag.to_string()), None).with_children(children)
    }

    fn roles_and_text(spans: &[Span]) -> Vec<(Role, &str)> {
        spans.iter().map(|s| (s.role(), s.text())).collect()
    }

    #[test]
    fn test_heading_covering_title_only() {
        let text = "# Title";
        let root = container("document", vec![node(NodeKind::Heading, "1:3-1:7")]);
        let spans = extract_spans(&root, text, &RoleConfig::default()).unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].role(), Role::Heading);
        assert_eq!((spans[0].start(), spans[0].end()), (0, 7));
        assert_eq!(spans[0].text(), "# Title");
    }

    #[test]
    fn test_containers_are_transparent() {
        let text = "*a* and `b`";
        let root = container(
            "document",
            vec![container(
                "paragraph",
                vec![
                    node(NodeKind::Emph, "1:1-1:3"),
                    container("text", vec![]),
                    node(NodeKind::Code, "1:10-1:10"),
                ],
            )],
        );
        let spans = extract_spans(&root, text, &RoleConfig::default()).unwrap();
        assert_eq!(
            roles_and_text(&spans),
            vec![(Role::Emphasis, "*a*"), (Role::CodeSpan, "`b`")]
        );
    }

    #[test]
    fn test_recognized_nodes_do_not_recurse() {
        let text = "**a *b***";
        let root = container(
            "document",
            vec![node(NodeKind::Strong, "1:1-1:9")
                .with_children(vec![node(NodeKind::Emph, "1:5-1:7")])],
        );
        let spans = extract_spans(&root, text, &RoleConfig::default()).unwrap();
        assert_eq!(roles_and_text(&spans), vec![(Role::StrongEmphasis, text)]);
    }

    #[test]
    fn test_list_items_recurse_into_content() {
        let text = "- *a*\n- b";
        let root = container(
            "document",
            vec![container(
                "list",
                vec![
                    node(NodeKind::Item, "1:1-1:5").with_children(vec![container(
                        "paragraph",
                        vec![node(NodeKind::Emph, "1:3-1:5")],
                    )]),
                    node(NodeKind::Item, "2:1-2:3"),
                ],
            )],
        );
        let spans = extract_spans(&root, text, &RoleConfig::default()).unwrap();
        assert_eq!(
            roles_and_text(&spans),
            vec![
                (Role::ListBullet, "-"),
                (Role::Emphasis, "*a*"),
                (Role::ListBullet, "-"),
            ]
        );
    }

    #[test]
    fn test_disabled_kind_is_walked_through() {
        let text = "> *a*";
        let paragraph = container("paragraph", vec![node(NodeKind::Emph, "1:3-1:5")]);
        let quote = node(NodeKind::BlockQuote, "1:1-1:5").with_children(vec![paragraph]);
        let root = container("document", vec![quote]);

        let spans = extract_spans(&root, text, &RoleConfig::default()).unwrap();
        assert_eq!(roles_and_text(&spans), vec![(Role::BlockQuote, "> *a*")]);

        let roles = RoleConfig {
            block_quote: false,
            ..RoleConfig::default()
        };
        let spans = extract_spans(&root, text, &roles).unwrap();
        assert_eq!(roles_and_text(&spans), vec![(Role::Emphasis, "*a*")]);
    }

    #[test]
    fn test_image_is_link() {
        let text = "![a](b)";
        let root = container("document", vec![node(NodeKind::Image, "1:1-1:7")]);
        let spans = extract_spans(&root, text, &RoleConfig::default()).unwrap();
        assert_eq!(roles_and_text(&spans), vec![(Role::Link, text)]);
    }

    #[test]
    fn test_missing_sourcepos_is_error() {
        let root = container("document", vec![ParseNode::new(NodeKind::Heading, None)]);
        assert!(matches!(
            extract_spans(&root, "# a", &RoleConfig::default()),
            Err(SpanError::MissingSourcePos { tag }) if tag == "heading"
        ));
    }

    #[test]
    fn test_out_of_range_position_is_error() {
        let root = container("document", vec![node(NodeKind::Emph, "1:1-1:9")]);
        assert!(matches!(
            extract_spans(&root, "*a*", &RoleConfig::default()),
            Err(SpanError::OffsetOutOfRange { .. })
        ));
    }

    #[test]
    fn test_from_xml_fenced_code_block() {
        let text = "```\nfoo\n```";
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE document SYSTEM "CommonMark.dtd">
<document sourcepos="1:1-3:3" xmlns="http://commonmark.org/xml/1.0">
  <code_block sourcepos="1:1-3:3" xml:space="preserve">foo
</code_block>
</document>"#;
        let root = parse_tree(xml).unwrap();
        let spans = extract_spans(&root, text, &RoleConfig::default()).unwrap();
        assert_eq!(roles_and_text(&spans), vec![(Role::CodeBlock, text)]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "1. `a`\n2. b";
        let root = container(
            "document",
            vec![container(
                "list",
                vec![
                    node(NodeKind::Item, "1:1-1:6")
                        .with_children(vec![node(NodeKind::Code, "1:5-1:5")]),
                    node(NodeKind::Item, "2:1-2:4"),
                ],
            )],
        );
        let first = extract_spans(&root, text, &RoleConfig::default()).unwrap();
        let second = extract_spans(&root, text, &RoleConfig::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            roles_and_text(&first),
            vec![
                (Role::ListNumber, "1."),
                (Role::CodeSpan, "`a`"),
                (Role::ListNumber, "2."),
            ]
        );
    }
}

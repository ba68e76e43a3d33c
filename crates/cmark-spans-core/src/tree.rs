//! Reader for the reference parser's XML output
//!
//! Only elements in the CommonMark namespace with a known local name become
//! recognized kinds. Everything else (paragraphs, text, lists, elements from
//! other namespaces) is kept as an opaque container so the extractor can
//! still walk through it.

use crate::error::{Result, SpanError};
use crate::positions::SourceRange;
use crate::roles::Role;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

pub const COMMONMARK_NS: &str = "http://commonmark.org/xml/1.0";

/// Kind of a reference tree element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    CodeBlock,
    Code,
    Emph,
    Strong,
    Heading,
    BlockQuote,
    Link,
    Image,
    Item,
    HtmlBlock,
    ThematicBreak,
    /// Any other element, by qualified tag name.
    Opaque(String),
}

impl NodeKind {
    /// Map a CommonMark-namespace local name to its kind.
    pub fn from_local_name(name: &str) -> Self {
        match name {
            "code_block" => NodeKind::CodeBlock,
            "code" => NodeKind::Code,
            "emph" => NodeKind::Emph,
            "strong" => NodeKind::Strong,
            "heading" => NodeKind::Heading,
            "block_quote" => NodeKind::BlockQuote,
            "link" => NodeKind::Link,
            "image" => NodeKind::Image,
            "item" => NodeKind::Item,
            "html_block" => NodeKind::HtmlBlock,
            "thematic_break" => NodeKind::ThematicBreak,
            other => NodeKind::Opaque(other.to_string()),
        }
    }

    /// Role a recognized kind is emitted with before refinement.
    pub fn role(&self) -> Option<Role> {
        match self {
            NodeKind::CodeBlock => Some(Role::CodeBlock),
            NodeKind::Code => Some(Role::CodeSpan),
            NodeKind::Emph => Some(Role::Emphasis),
            NodeKind::Strong => Some(Role::StrongEmphasis),
            NodeKind::Heading => Some(Role::Heading),
            NodeKind::BlockQuote => Some(Role::BlockQuote),
            NodeKind::Link | NodeKind::Image => Some(Role::Link),
            NodeKind::Item => Some(Role::ListItem),
            NodeKind::HtmlBlock => Some(Role::HtmlBlock),
            NodeKind::ThematicBreak => Some(Role::ThematicBreak),
            NodeKind::Opaque(_) => None,
        }
    }

    /// Tag name as written in the CommonMark XML vocabulary.
    pub fn tag(&self) -> &str {
        match self {
            NodeKind::CodeBlock => "code_block",
            NodeKind::Code => "code",
            NodeKind::Emph => "emph",
            NodeKind::Strong => "strong",
            NodeKind::Heading => "heading",
            NodeKind::BlockQuote => "block_quote",
            NodeKind::Link => "link",
            NodeKind::Image => "image",
            NodeKind::Item => "item",
            NodeKind::HtmlBlock => "html_block",
            NodeKind::ThematicBreak => "thematic_break",
            NodeKind::Opaque(tag) => tag,
        }
    }
}

/// One element of the reference tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode {
    pub kind: NodeKind,
    pub sourcepos: Option<SourceRange>,
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    pub fn new(kind: NodeKind, sourcepos: Option<SourceRange>) -> Self {
        Self {
            kind,
            sourcepos,
            children: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_children(mut self, children: Vec<ParseNode>) -> Self {
        self.children = children;
        self
    }
}

/// Parse a serialized reference tree.
pub fn parse_tree(xml: &str) -> Result<ParseNode> {
    let mut reader = NsReader::from_str(xml);
    let mut stack: Vec<ParseNode> = Vec::new();
    let mut root: Option<ParseNode> = None;

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        let in_commonmark = match ns {
            ResolveResult::Bound(Namespace(uri)) => uri == COMMONMARK_NS.as_bytes(),
            _ => false,
        };

        match event {
            Event::Start(e) => {
                stack.push(node_from_element(&e, in_commonmark)?);
            }
            Event::Empty(e) => {
                let node = node_from_element(&e, in_commonmark)?;
                attach(node, &mut stack, &mut root)?;
            }
            Event::End(e) => {
                let node = stack.pop().ok_or_else(|| {
                    SpanError::UnbalancedTree(format!(
                        "unexpected </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                attach(node, &mut stack, &mut root)?;
            }
            Event::Eof => break,
            // Text, comments, declarations and doctypes carry no structure.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(SpanError::UnbalancedTree(format!(
            "<{}> is never closed",
            open.kind.tag()
        )));
    }
    root.ok_or(SpanError::EmptyTree)
}

fn node_from_element(e: &BytesStart<'_>, in_commonmark: bool) -> Result<ParseNode> {
    let kind = if in_commonmark {
        NodeKind::from_local_name(&String::from_utf8_lossy(e.local_name().as_ref()))
    } else {
        NodeKind::Opaque(String::from_utf8_lossy(e.name().as_ref()).into_owned())
    };

    let sourcepos = match e
        .try_get_attribute("sourcepos")
        .map_err(quick_xml::Error::from)?
    {
        Some(attr) => {
            let value = std::str::from_utf8(&attr.value).map_err(|_| {
                SpanError::MalformedSourcePos {
                    value: String::from_utf8_lossy(&attr.value).into_owned(),
                }
            })?;
            Some(value.parse::<SourceRange>()?)
        }
        None => None,
    };

    Ok(ParseNode::new(kind, sourcepos))
}

fn attach(node: ParseNode, stack: &mut [ParseNode], root: &mut Option<ParseNode>) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(SpanError::UnbalancedTree(format!(
            "second root element <{}>",
            node.kind.tag()
        )));
    }
    *root = Some(node);
    Ok(())
}

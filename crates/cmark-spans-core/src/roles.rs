//! Token roles and the span type emitted for them.

use crate::error::{Result, SpanError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label attached to every emitted span.
///
/// Serialized names are the role names the downstream tokenizer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    CodeBlock,
    CodeSpan,
    Emphasis,
    StrongEmphasis,
    Heading,
    BlockQuote,
    Link,
    /// A list item whose text starts with no recognizable marker.
    ListItem,
    /// Ordered list marker such as `1.` or `3)`.
    ListNumber,
    /// Bullet list marker: `-`, `*` or `+`.
    ListBullet,
    HtmlBlock,
    ThematicBreak,
    /// A whole link reference definition line.
    LinkRef,
}

impl Role {
    /// List roles emit a marker span and still have their content tokenized.
    pub fn is_list(self) -> bool {
        matches!(self, Role::ListItem | Role::ListNumber | Role::ListBullet)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::CodeBlock => "CodeBlock",
            Role::CodeSpan => "CodeSpan",
            Role::Emphasis => "Emphasis",
            Role::StrongEmphasis => "StrongEmphasis",
            Role::Heading => "Heading",
            Role::BlockQuote => "BlockQuote",
            Role::Link => "Link",
            Role::ListItem => "ListItem",
            Role::ListNumber => "ListNumber",
            Role::ListBullet => "ListBullet",
            Role::HtmlBlock => "HtmlBlock",
            Role::ThematicBreak => "ThematicBreak",
            Role::LinkRef => "LinkRef",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled `[start, end)` byte range over a document.
///
/// `text` is copied out of the document at construction and the fields are
/// read-only, so `text == document[start..end]` for every span that exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    role: Role,
    start: usize,
    end: usize,
    text: String,
}

impl Span {
    pub fn new(role: Role, start: usize, end: usize, document: &str) -> Result<Self> {
        if start > end {
            return Err(SpanError::InvertedSpan { start, end });
        }
        if end > document.len() {
            return Err(SpanError::OffsetOutOfRange {
                offset: end,
                len: document.len(),
            });
        }
        for offset in [start, end] {
            if !document.is_char_boundary(offset) {
                return Err(SpanError::NotCharBoundary { offset });
            }
        }
        Ok(Self {
            role,
            start,
            end,
            text: document[start..end].to_string(),
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

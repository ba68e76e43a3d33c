//! Fixture generation configuration

use crate::annotate::{SkipReason, SkipTable};
use crate::error::{Result, SpanError};
use crate::link_refs::LinkRefStyle;
use crate::tree::NodeKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for one fixture generation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanConfig {
    /// Which reference tree kinds produce spans
    pub roles: RoleConfig,

    /// Link reference definition detection
    pub link_refs: LinkRefConfig,

    /// Known-divergent test cases
    pub skip: SkipTable,
}

/// Helper function for serde default
fn default_true() -> bool {
    true
}

/// Per-kind switches. A disabled kind is walked through like any other
/// container instead of emitting a span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    #[serde(default = "default_true")]
    pub code_block: bool,

    #[serde(default = "default_true")]
    pub code_span: bool,

    #[serde(default = "default_true")]
    pub emphasis: bool,

    #[serde(default = "default_true")]
    pub strong_emphasis: bool,

    #[serde(default = "default_true")]
    pub heading: bool,

    #[serde(default = "default_true")]
    pub block_quote: bool,

    #[serde(default = "default_true")]
    pub link: bool,

    #[serde(default = "default_true")]
    pub image: bool,

    #[serde(default = "default_true")]
    pub list_item: bool,

    #[serde(default = "default_true")]
    pub html_block: bool,

    #[serde(default = "default_true")]
    pub thematic_break: bool,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            code_block: true,
            code_span: true,
            emphasis: true,
            strong_emphasis: true,
            heading: true,
            block_quote: true,
            link: true,
            image: true,
            list_item: true,
            html_block: true,
            thematic_break: true,
        }
    }
}

impl RoleConfig {
    /// Whether a node of this kind is emitted. Opaque kinds never are.
    pub fn is_enabled(&self, kind: &NodeKind) -> bool {
        match kind {
            NodeKind::CodeBlock => self.code_block,
            NodeKind::Code => self.code_span,
            NodeKind::Emph => self.emphasis,
            NodeKind::Strong => self.strong_emphasis,
            NodeKind::Heading => self.heading,
            NodeKind::BlockQuote => self.block_quote,
            NodeKind::Link => self.link,
            NodeKind::Image => self.image,
            NodeKind::Item => self.list_item,
            NodeKind::HtmlBlock => self.html_block,
            NodeKind::ThematicBreak => self.thematic_break,
            NodeKind::Opaque(_) => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkRefConfig {
    /// Span the label only, or the whole definition line
    pub style: LinkRefStyle,

    /// Section name fragments (case-insensitive) to scan; empty scans all
    pub sections: Vec<String>,
}

impl Default for LinkRefConfig {
    fn default() -> Self {
        Self {
            style: LinkRefStyle::Label,
            sections: vec!["link reference".to_string()],
        }
    }
}

impl LinkRefConfig {
    /// Whether test cases from `section` get link reference spans
    pub fn applies_to(&self, section: &str) -> bool {
        if self.sections.is_empty() {
            return true;
        }
        let section = section.to_lowercase();
        self.sections
            .iter()
            .any(|fragment| section.contains(&fragment.to_lowercase()))
    }
}

impl SpanConfig {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SpanError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| SpanError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load config when a path is given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Reason a test case is excluded from strict comparison, if any
    pub fn skip_reason(&self, section: &str, example: u32) -> Option<SkipReason> {
        self.skip.lookup(section, example)
    }
}

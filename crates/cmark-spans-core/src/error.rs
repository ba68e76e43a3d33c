//! Error types for span extraction

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpanError>;

/// Errors raised while turning a test case into spans.
///
/// Offset-accounting variants are never recovered from: they mean the line
/// arithmetic disagrees with the reference parser and the output would be
/// silently wrong.
#[derive(Error, Debug)]
pub enum SpanError {
    #[error("malformed source position '{value}' (expected L:C-L:C)")]
    MalformedSourcePos { value: String },

    #[error("<{tag}> has no sourcepos attribute")]
    MissingSourcePos { tag: String },

    #[error("failed to read reference tree")]
    Xml(#[from] quick_xml::Error),

    #[error("reference tree has no root element")]
    EmptyTree,

    #[error("reference tree is unbalanced: {0}")]
    UnbalancedTree(String),

    #[error("line {line} is past the end of the document ({lines} lines)")]
    LineOutOfRange { line: usize, lines: usize },

    #[error("column {column} on line {line} resolves before the start of the document")]
    ColumnUnderflow { line: usize, column: usize },

    #[error("offset {offset} is past the end of the document (length {len})")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },

    #[error("span {start}..{end} ends before it starts")]
    InvertedSpan { start: usize, end: usize },

    #[error("{section} example {example}")]
    Fixture {
        section: String,
        example: u32,
        #[source]
        source: Box<SpanError>,
    },

    #[error("failed to parse test cases")]
    TestCases(#[source] serde_json::Error),

    #[error("failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl SpanError {
    /// Attach the test case that produced this error.
    pub fn in_fixture(self, section: &str, example: u32) -> Self {
        SpanError::Fixture {
            section: section.to_string(),
            example,
            source: Box::new(self),
        }
    }
}

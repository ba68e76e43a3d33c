//! # cmark-spans-core
//!
//! Turns the CommonMark reference parser's XML output into the flat token
//! spans a markdown tokenizer's test suite compares against.
//!
//! Pipeline per test case:
//! - read the `sourcepos`-annotated tree ([`tree`])
//! - resolve `line:column` ranges to byte offsets ([`positions`])
//! - refine each recognized node's boundaries to the tokenizer's conventions
//!   ([`refine`], driven by [`extract`])
//! - add link reference definition spans found in the raw text ([`link_refs`])
//! - merge, name and annotate the record ([`fixture`], [`annotate`])

pub mod annotate;
pub mod config;
pub mod error;
pub mod extract;
pub mod fixture;
pub mod link_refs;
pub mod positions;
pub mod refine;
pub mod roles;
pub mod tree;

pub use annotate::{SkipReason, SkipTable};
pub use config::SpanConfig;
pub use error::{Result, SpanError};
pub use fixture::{munge, munge_all, parse_test_cases, FixtureRecord, TestCase};
pub use roles::{Role, Span};

/// Combine tree spans and supplementary spans into one token sequence.
///
/// Ordered by start offset; spans starting at the same offset keep the order
/// they were found in. Overlaps and duplicates are kept.
pub fn merge_spans(tree_spans: Vec<Span>, extra_spans: Vec<Span>) -> Vec<Span> {
    let mut tokens = tree_spans;
    tokens.extend(extra_spans);
    tokens.sort_by_key(Span::start);
    tokens
}

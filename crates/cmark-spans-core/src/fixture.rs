//! Test case records in, fixture records out

use crate::annotate::SkipReason;
use crate::config::SpanConfig;
use crate::error::{Result, SpanError};
use crate::extract::extract_spans;
use crate::link_refs::link_ref_spans;
use crate::merge_spans;
use crate::positions::normalize_trailing_newline;
use crate::roles::Span;
use crate::tree::parse_tree;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One entry of the CommonMark spec test suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub markdown: String,
    pub section: String,
    pub example: u32,
    /// Reference parser output with `sourcepos` attributes.
    pub xml: String,
}

/// Tokenizer fixture for one test case.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureRecord {
    pub name: String,
    pub markdown: String,
    pub tokens: Vec<Span>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
}

/// Parse the test case file contents.
pub fn parse_test_cases(content: &str) -> Result<Vec<TestCase>> {
    serde_json::from_str(content).map_err(SpanError::TestCases)
}

/// Fixture name: lower-cased section followed by the example number.
pub fn fixture_name(section: &str, example: u32) -> String {
    format!("{} {}", section.to_lowercase(), example)
}

/// Build the fixture for a single test case.
pub fn munge(case: &TestCase, config: &SpanConfig) -> Result<FixtureRecord> {
    let markdown = normalize_trailing_newline(&case.markdown);

    let root = parse_tree(&case.xml)?;
    let tree_spans = extract_spans(&root, markdown, &config.roles)?;

    let extra_spans = if config.link_refs.applies_to(&case.section) {
        link_ref_spans(markdown, config.link_refs.style)?
    } else {
        Vec::new()
    };

    let tokens = merge_spans(tree_spans, extra_spans);
    tracing::debug!(
        section = %case.section,
        example = case.example,
        tokens = tokens.len(),
        "munged test case"
    );

    Ok(FixtureRecord {
        name: fixture_name(&case.section, case.example),
        markdown: markdown.to_string(),
        tokens,
        skip_reason: config.skip_reason(&case.section, case.example),
    })
}

/// Build fixtures for every test case, in input order.
///
/// Cases are processed in parallel. If any fail, the error for the earliest
/// failing case is returned.
pub fn munge_all(cases: &[TestCase], config: &SpanConfig) -> Result<Vec<FixtureRecord>> {
    let results: Vec<Result<FixtureRecord>> = cases
        .par_iter()
        .map(|case| munge(case, config).map_err(|e| e.in_fixture(&case.section, case.example)))
        .collect();

    results.into_iter().collect()
}

//! Skip annotations for test cases known to diverge

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a fixture is excluded from strict comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    #[serde(rename = "construct is not produced by the tokenizer")]
    Unsupported,
    #[serde(rename = "tokenizer spans intentionally differ from the reference tree")]
    KnownDivergence,
    #[serde(rename = "reference tree does not model this construct")]
    Unmodeled,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::Unsupported => "construct is not produced by the tokenizer",
            SkipReason::KnownDivergence => {
                "tokenizer spans intentionally differ from the reference tree"
            }
            SkipReason::Unmodeled => "reference tree does not model this construct",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSkip {
    pub section: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSkip {
    pub example: u32,
    pub reason: SkipReason,
}

/// Lookup tables keyed by section name and example number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkipTable {
    pub sections: Vec<SectionSkip>,
    pub examples: Vec<ExampleSkip>,
}

impl Default for SkipTable {
    fn default() -> Self {
        let section = |name: &str, reason| SectionSkip {
            section: name.to_string(),
            reason,
        };
        Self {
            sections: vec![
                section("Tabs", SkipReason::KnownDivergence),
                section("Backslash escapes", SkipReason::Unsupported),
                section(
                    "Entity and numeric character references",
                    SkipReason::Unsupported,
                ),
                section("Autolinks", SkipReason::Unsupported),
                section("Raw HTML", SkipReason::Unsupported),
                section("Hard line breaks", SkipReason::Unsupported),
                section("Soft line breaks", SkipReason::Unsupported),
            ],
            examples: Vec::new(),
        }
    }
}

impl SkipTable {
    /// An example-number entry takes precedence over its section's entry.
    pub fn lookup(&self, section: &str, example: u32) -> Option<SkipReason> {
        self.examples
            .iter()
            .find(|e| e.example == example)
            .map(|e| e.reason)
            .or_else(|| {
                self.sections
                    .iter()
                    .find(|s| s.section.eq_ignore_ascii_case(section))
                    .map(|s| s.reason)
            })
    }
}

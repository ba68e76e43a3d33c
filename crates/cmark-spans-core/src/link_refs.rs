//! Link reference definition spans
//!
//! The reference tree resolves definitions like `[foo]: /url` away entirely,
//! so they are found by scanning the source text line by line.

use crate::error::Result;
use crate::positions::{lines_inclusive, trim_terminator};
use crate::roles::{Role, Span};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static LINK_REF_REGEX: OnceLock<Regex> = OnceLock::new();

/// What a definition span covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkRefStyle {
    /// The bracketed label, emitted as [`Role::Link`].
    Label,
    /// The whole line including its terminator, emitted as [`Role::LinkRef`].
    Line,
}

fn link_ref_regex() -> &'static Regex {
    LINK_REF_REGEX.get_or_init(|| {
        Regex::new(r"^[ ]{0,3}(\[[^\]]+\]):").expect("BUG: invalid static regex: link reference")
    })
}

/// Find link reference definition lines in `text`.
pub fn link_ref_spans(text: &str, style: LinkRefStyle) -> Result<Vec<Span>> {
    let re = link_ref_regex();
    let mut spans = Vec::new();

    for (line_start, line) in lines_inclusive(text) {
        let Some(caps) = re.captures(trim_terminator(line)) else {
            continue;
        };
        let span = match style {
            LinkRefStyle::Line => {
                Span::new(Role::LinkRef, line_start, line_start + line.len(), text)?
            }
            LinkRefStyle::Label => match caps.get(1) {
                Some(label) => Span::new(
                    Role::Link,
                    line_start + label.start(),
                    line_start + label.end(),
                    text,
                )?,
                None => continue,
            },
        };
        spans.push(span);
    }

    Ok(spans)
}

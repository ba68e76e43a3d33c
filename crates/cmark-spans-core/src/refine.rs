//! Boundary refinement rules.
//!
//! The reference tree's source positions rarely cover exactly what the
//! downstream tokenizer reports for a construct: code spans exclude their
//! backticks, indented code excludes its indentation, list items cover their
//! whole content instead of just the marker. Each role maps to one pure rule
//! that moves the raw boundaries to the tokenizer's convention.

use crate::roles::Role;
use regex::Regex;
use std::sync::OnceLock;

static ORDERED_MARKER_REGEX: OnceLock<Regex> = OnceLock::new();
static BULLET_MARKER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Boundaries and role after refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refined {
    pub start: usize,
    pub end: usize,
    pub role: Role,
}

/// A refinement rule: `(text, start, end) -> refined span`.
pub type RefineFn = fn(&str, usize, usize) -> Refined;

/// Look up the rule for a raw role.
pub fn rule_for(role: Role) -> RefineFn {
    match role {
        Role::ListItem => refine_list_item,
        Role::CodeSpan => refine_code_span,
        Role::CodeBlock => refine_code_block,
        Role::Heading => refine_heading,
        Role::ThematicBreak => refine_thematic_break,
        Role::Emphasis => keep_emphasis,
        Role::StrongEmphasis => keep_strong_emphasis,
        Role::BlockQuote => keep_block_quote,
        Role::Link => keep_link,
        Role::HtmlBlock => keep_html_block,
        Role::ListNumber => keep_list_number,
        Role::ListBullet => keep_list_bullet,
        Role::LinkRef => keep_link_ref,
    }
}

/// Apply the rule for `role` to a raw span.
pub fn refine(role: Role, text: &str, start: usize, end: usize) -> Refined {
    rule_for(role)(text, start, end)
}

fn ordered_marker() -> &'static Regex {
    ORDERED_MARKER_REGEX.get_or_init(|| {
        Regex::new(r"^\d+(\.|\))").expect("BUG: invalid static regex: ordered list marker")
    })
}

fn bullet_marker() -> &'static Regex {
    BULLET_MARKER_REGEX.get_or_init(|| {
        Regex::new(r"^(-|\*|\+)").expect("BUG: invalid static regex: bullet list marker")
    })
}

fn refine_list_item(text: &str, start: usize, end: usize) -> Refined {
    let unchanged = Refined {
        start,
        end,
        role: Role::ListItem,
    };
    let Some(item) = text.get(start..end) else {
        return unchanged;
    };

    if let Some(marker) = ordered_marker().find(item) {
        return Refined {
            start,
            end: start + marker.end(),
            role: Role::ListNumber,
        };
    }
    if let Some(marker) = bullet_marker().find(item) {
        return Refined {
            start,
            end: start + marker.end(),
            role: Role::ListBullet,
        };
    }
    unchanged
}

fn refine_code_span(text: &str, start: usize, end: usize) -> Refined {
    let bytes = text.as_bytes();
    Refined {
        start: extend_back(bytes, start, |b| b == b'`'),
        end: extend_forward(bytes, end, |b| b == b'`'),
        role: Role::CodeSpan,
    }
}

fn refine_code_block(text: &str, start: usize, end: usize) -> Refined {
    let bytes = text.as_bytes();
    Refined {
        start: extend_back(bytes, start, is_blank),
        end: take_trailing_newline(bytes, end),
        role: Role::CodeBlock,
    }
}

fn refine_heading(text: &str, start: usize, end: usize) -> Refined {
    let bytes = text.as_bytes();
    let mut end = end;
    while end > 0 && end < bytes.len() && bytes[end - 1] != b'\n' {
        end += 1;
    }
    Refined {
        start: extend_back(bytes, start, |b| is_blank(b) || b == b'#'),
        end,
        role: Role::Heading,
    }
}

fn refine_thematic_break(text: &str, start: usize, end: usize) -> Refined {
    let bytes = text.as_bytes();
    Refined {
        start: extend_back(bytes, start, is_blank),
        end: take_trailing_newline(bytes, end),
        role: Role::ThematicBreak,
    }
}

macro_rules! keep_as {
    ($($fname:ident => $role:expr),* $(,)?) => {
        $(
            fn $fname(_text: &str, start: usize, end: usize) -> Refined {
                Refined {
                    start,
                    end,
                    role: $role,
                }
            }
        )*
    };
}

keep_as! {
    keep_emphasis => Role::Emphasis,
    keep_strong_emphasis => Role::StrongEmphasis,
    keep_block_quote => Role::BlockQuote,
    keep_link => Role::Link,
    keep_html_block => Role::HtmlBlock,
    keep_list_number => Role::ListNumber,
    keep_list_bullet => Role::ListBullet,
    keep_link_ref => Role::LinkRef,
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn extend_back(bytes: &[u8], mut start: usize, accept: impl Fn(u8) -> bool) -> usize {
    if start > bytes.len() {
        return start;
    }
    while start > 0 && accept(bytes[start - 1]) {
        start -= 1;
    }
    start
}

fn extend_forward(bytes: &[u8], mut end: usize, accept: impl Fn(u8) -> bool) -> usize {
    while end < bytes.len() && accept(bytes[end]) {
        end += 1;
    }
    end
}

/// Include a newline directly after the span unless the span already ends
/// with one.
fn take_trailing_newline(bytes: &[u8], end: usize) -> usize {
    let at_newline = bytes.get(end) == Some(&b'\n');
    let ends_with_newline = end > 0 && bytes.get(end - 1) == Some(&b'\n');
    if at_newline && !ends_with_newline {
        end + 1
    } else {
        end
    }
}

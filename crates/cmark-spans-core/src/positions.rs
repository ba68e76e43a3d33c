//! Line/column to byte offset resolution.
//!
//! The reference parser reports positions as 1-indexed `line:column` pairs
//! where columns count bytes and lines are terminated by `\n`, `\r\n` or `\r`.
//! [`LineIndex`] precomputes line starts with that same terminator set so that
//! resolving a coordinate is a lookup plus an addition.

use crate::error::{Result, SpanError};
use std::fmt;
use std::str::FromStr;

/// A 1-indexed `line:column` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

impl LineCol {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl FromStr for LineCol {
    type Err = SpanError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || SpanError::MalformedSourcePos {
            value: s.to_string(),
        };
        let (line, column) = s.split_once(':').ok_or_else(malformed)?;
        let line = parse_number(line).ok_or_else(malformed)?;
        let column = parse_number(column).ok_or_else(malformed)?;
        Ok(LineCol { line, column })
    }
}

/// An inclusive `start-end` source range, as written in a `sourcepos`
/// attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRange {
    pub start: LineCol,
    pub end: LineCol,
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for SourceRange {
    type Err = SpanError;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| SpanError::MalformedSourcePos {
                value: s.to_string(),
            })?;
        // Report the whole attribute rather than the half that failed.
        let whole = |_| SpanError::MalformedSourcePos {
            value: s.to_string(),
        };
        Ok(SourceRange {
            start: start.parse().map_err(whole)?,
            end: end.parse().map_err(whole)?,
        })
    }
}

fn parse_number(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Precomputed line starts for one document.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(lines_inclusive(text).skip(1).map(|(start, _)| start));
        // A trailing terminator opens an empty final line.
        if ends_with_terminator(text) {
            starts.push(text.len());
        }
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Number of lines, counting an empty line after a trailing terminator.
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Byte offset where 1-indexed `line` begins.
    ///
    /// The line just past the last one begins at the end of the document.
    pub fn line_start(&self, line: usize) -> Result<usize> {
        if line == 0 {
            return Err(SpanError::LineOutOfRange {
                line,
                lines: self.line_count(),
            });
        }
        match self.starts.get(line - 1) {
            Some(&start) => Ok(start),
            None if line - 1 == self.starts.len() => Ok(self.len),
            None => Err(SpanError::LineOutOfRange {
                line,
                lines: self.line_count(),
            }),
        }
    }

    /// Resolve a coordinate to a 0-indexed byte offset.
    pub fn resolve(&self, pos: LineCol) -> Result<usize> {
        let offset = (self.line_start(pos.line)? + pos.column)
            .checked_sub(1)
            .ok_or(SpanError::ColumnUnderflow {
                line: pos.line,
                column: pos.column,
            })?;
        if offset > self.len {
            return Err(SpanError::OffsetOutOfRange {
                offset,
                len: self.len,
            });
        }
        Ok(offset)
    }

    /// Resolve an inclusive source range to a half-open `[start, end)` pair.
    pub fn resolve_range(&self, range: SourceRange) -> Result<(usize, usize)> {
        let start = self.resolve(range.start)?;
        let end = self.resolve(range.end)? + 1;
        Ok((start, end))
    }
}

/// Iterate lines with their terminators, yielding `(start_offset, line)`.
pub fn lines_inclusive(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    std::iter::from_fn(move || {
        if pos >= bytes.len() {
            return None;
        }
        let start = pos;
        while pos < bytes.len() {
            match bytes[pos] {
                b'\n' => {
                    pos += 1;
                    break;
                }
                b'\r' => {
                    pos += 1;
                    if bytes.get(pos) == Some(&b'\n') {
                        pos += 1;
                    }
                    break;
                }
                _ => pos += 1,
            }
        }
        Some((start, &text[start..pos]))
    })
}

/// Strip a line's terminator, if any.
pub fn trim_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

fn ends_with_terminator(text: &str) -> bool {
    text.ends_with('\n') || text.ends_with('\r')
}

/// Remove one trailing line terminator from a document.
///
/// Every offset in a fixture is relative to the normalized text, so this must
/// run once, before any position is resolved.
pub fn normalize_trailing_newline(text: &str) -> &str {
    trim_terminator(text)
}

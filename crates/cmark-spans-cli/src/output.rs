//! JSON rendering for fixture output.

use serde::Serialize;

/// Render `value` as JSON, pretty-printed with two-space indentation unless
/// `compact` is set.
pub fn render<T: Serialize + ?Sized>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

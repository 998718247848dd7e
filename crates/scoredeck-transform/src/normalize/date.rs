#![deny(unsafe_code)]

//! Pattern-driven date normalization.
//!
//! Unlike numbers, an unparseable date is never replaced by a sentinel; the
//! original text is preserved for manual inspection. chrono's `%y` pivot
//! (00–68 → 2000s) covers the API's two-digit years.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

/// Parse a raw value against the rule's input pattern.
pub fn parse_with_pattern(raw: &str, pattern: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, pattern).ok()
}

/// Re-render a raw date into the target output pattern, or `None` when the
/// value (or either pattern) does not parse.
pub fn reformat(raw: &str, input_pattern: &str, output_pattern: &str) -> Option<String> {
    if !pattern_is_valid(output_pattern) {
        return None;
    }
    parse_with_pattern(raw, input_pattern).map(|date| date.format(output_pattern).to_string())
}

// A bad configured pattern must degrade like a bad value, not panic inside
// chrono's Display impl.
fn pattern_is_valid(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

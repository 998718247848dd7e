#![deny(unsafe_code)]

//! Locale-aware numeric normalization.
//!
//! The API renders numbers for humans: thousands groups separated by plain,
//! narrow or non-breaking spaces, comma as the decimal separator
//! (`"1 234,56"`). Cleanup is character-level so any input string survives
//! it.

/// Reduce a raw value to a parseable number shape.
///
/// Strips everything except digits, `.`, `,` and `-`; folds the locale
/// decimal comma into `.`; when more than one `.` remains, the first one is
/// kept as the decimal point and the rest are dropped so their digits
/// concatenate.
pub fn clean_numeric_text(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    let cleaned = cleaned.replace(',', ".");
    if cleaned.matches('.').count() <= 1 {
        return cleaned;
    }
    let mut out = String::with_capacity(cleaned.len());
    let mut seen_dot = false;
    for c in cleaned.chars() {
        if c == '.' {
            if seen_dot {
                continue;
            }
            seen_dot = true;
        }
        out.push(c);
    }
    out
}

/// Parse a raw value after cleanup. `None` for empty or garbage input.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let cleaned = clean_numeric_text(raw);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

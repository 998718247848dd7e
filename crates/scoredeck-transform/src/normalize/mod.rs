//! Normalization primitives used by the type coercer.
//!
//! - **numeric**: locale cleanup and float/int parsing
//! - **date**: pattern-driven parsing and reformatting

pub mod date;
pub mod numeric;

pub use date::{parse_with_pattern, reformat};
pub use numeric::{clean_numeric_text, parse_numeric, round_to};

//! Property tests for coercion totality.

use proptest::prelude::*;

use scoredeck_model::{CoercionRules, DateRule, Diagnostics, NumericRule, NumericTarget, Scalar};
use scoredeck_transform::coerce;
use scoredeck_transform::normalize::{clean_numeric_text, parse_numeric};

proptest! {
    #[test]
    fn numeric_parsing_never_panics(raw in ".*") {
        let _ = parse_numeric(&raw);
    }

    #[test]
    fn cleaned_text_keeps_at_most_one_dot(raw in ".*") {
        prop_assert!(clean_numeric_text(&raw).matches('.').count() <= 1);
    }

    #[test]
    fn cleaned_text_is_ascii_number_shaped(raw in ".*") {
        prop_assert!(clean_numeric_text(&raw)
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-'));
    }

    #[test]
    fn coercion_always_yields_a_value(raw in ".*") {
        let rules = CoercionRules {
            numeric: vec![NumericRule {
                fields: vec!["v".to_string()],
                target: NumericTarget::Float,
                decimals: 2,
                replace_original: true,
            }],
            date: Vec::new(),
        };
        let record = [("v".to_string(), Scalar::Text(raw))]
            .into_iter()
            .collect();
        let mut diagnostics = Diagnostics::new();
        let coerced = coerce(record, &rules, "prop", &mut diagnostics);
        prop_assert!(matches!(coerced.get("v"), Some(Scalar::Float(_))));
    }

    #[test]
    fn bad_dates_are_always_preserved(raw in "[^0-9]*") {
        let rules = CoercionRules {
            numeric: Vec::new(),
            date: vec![DateRule {
                fields: vec!["d".to_string()],
                input_format: "%d.%m.%y".to_string(),
                output_format: "%Y-%m-%d".to_string(),
                replace_original: true,
            }],
        };
        let record = [("d".to_string(), Scalar::Text(raw.clone()))]
            .into_iter()
            .collect();
        let mut diagnostics = Diagnostics::new();
        let coerced = coerce(record, &rules, "prop", &mut diagnostics);
        prop_assert_eq!(coerced.get("d"), Some(&Scalar::Text(raw)));
    }
}

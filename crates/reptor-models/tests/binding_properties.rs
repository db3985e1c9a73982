// crates/reptor-models/tests/binding_properties.rs
// =============================================================================
// Module: Binding Property Tests
// Description: Randomized checks of leaf type predicates.
// Purpose: Ensure accepted values round-trip and foreign shapes are rejected.
// =============================================================================

//! Property-based binding tests for reptor-models.

#![allow(
    clippy::unwrap_used,
    clippy::panic,
    reason = "proptest assertions operate on generated input."
)]

use std::sync::Arc;

use proptest::prelude::*;
use reptor_models::BindMode;
use reptor_models::BoundField;
use reptor_models::FieldSchema;
use reptor_models::FieldType;
use serde_json::Value;
use serde_json::json;

fn schema(field_type: FieldType) -> Arc<FieldSchema> {
    Arc::new(FieldSchema::new("field", field_type).unwrap())
}

proptest! {
    #[test]
    fn strings_round_trip(text in ".*") {
        let raw = Value::String(text);
        let field = BoundField::bind(schema(FieldType::Markdown), &raw, BindMode::Strict).unwrap();
        prop_assert_eq!(field.to_json(), raw);
    }

    #[test]
    fn booleans_reject_non_booleans(number in any::<i64>(), text in ".*") {
        for raw in [json!(number), json!(text), json!([]), json!({})] {
            prop_assert!(BoundField::bind(schema(FieldType::Boolean), &raw, BindMode::Strict).is_err());
        }
    }

    #[test]
    fn numbers_reject_booleans(flag in any::<bool>(), number in any::<i64>()) {
        prop_assert!(BoundField::bind(schema(FieldType::Number), &json!(flag), BindMode::Strict).is_err());
        let field = BoundField::bind(schema(FieldType::Number), &json!(number), BindMode::Strict).unwrap();
        prop_assert_eq!(field.to_json(), json!(number));
    }

    #[test]
    fn valid_dates_are_accepted(year in 1000i32..9999, month in 1u8..=12, day in 1u8..=28) {
        let raw = json!(format!("{year:04}-{month:02}-{day:02}"));
        prop_assert!(BoundField::bind(schema(FieldType::Date), &raw, BindMode::Strict).is_ok());
    }

    #[test]
    fn signed_dates_are_rejected(year in 1i32..9999, sign in prop::sample::select(vec!['+', '-'])) {
        let raw = json!(format!("{sign}{year:04}-01-01"));
        prop_assert!(BoundField::bind(schema(FieldType::Date), &raw, BindMode::Strict).is_err());
    }
}

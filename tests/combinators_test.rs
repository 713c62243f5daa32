//! Tests for the constraint combinators used outside the compiler.

use chrono::{TimeZone, Utc};
use propcheck::combinators::{combine, matches, max, max_length, min, min_length};
use propcheck::{checkers, ErrorKind, Prop, SchemaError, Validator, Value};
use regex::Regex;
use serde_json::json;

fn props(value: serde_json::Value) -> Value {
    Value::from(value)
}

#[test]
fn test_combine_single_is_identity() {
    let only = checkers::string();
    let combined = combine(vec![only.clone()]);

    let nested = props(json!({"list": [{}]}));
    let list = Prop::field(&nested, "list");
    let item = list.child(list.value().unwrap(), propcheck::PathSegment::index(0));
    let key = item.child(item.value().unwrap(), propcheck::PathSegment::field("key"));

    assert_eq!(
        only.required().validate(&key, "Form").unwrap_err(),
        combined.required().validate(&key, "Form").unwrap_err()
    );
}

#[test]
fn test_combine_empty_accepts_anything() {
    let combined = combine(Vec::new());
    let value = props(json!({"k": [1, 2, 3]}));
    assert!(combined.validate_field(&value, "k", "Form").is_ok());
    assert!(combined.validate_field(&value, "missing", "Form").is_ok());
}

#[test]
fn test_combine_returns_first_error_in_list_order() {
    let value = props(json!({"code": "ab1"}));

    let length_first = combine(vec![min_length(5), matches(Regex::new("^[a-z]+$").unwrap())]);
    assert_eq!(
        length_first.validate_field(&value, "code", "Form").unwrap_err().code,
        "min_length"
    );

    let pattern_first = combine(vec![matches(Regex::new("^[a-z]+$").unwrap()), min_length(5)]);
    assert_eq!(
        pattern_first.validate_field(&value, "code", "Form").unwrap_err().code,
        "pattern"
    );
}

#[test]
fn test_combined_required_uses_bare_name() {
    let value = props(json!({"outer": {"key": null}}));
    let outer = Prop::field(&value, "outer");
    let key = outer.child(outer.value().unwrap(), propcheck::PathSegment::field("key"));

    let combined = combine(vec![checkers::string(), max_length(3)]).required();
    let error = combined.validate(&key, "Form").unwrap_err();
    assert_eq!(
        error.message,
        "The prop `key` is marked as required in `Form`, but its value is `null`."
    );
    assert_eq!(error.path.to_string(), "outer.key");
    assert_eq!(error.kind, ErrorKind::RequiredMissing);
}

#[test]
fn test_required_called_twice_reports_once() {
    let validator = combine(vec![checkers::number(), min(1.0)]).required().required();
    let error = validator
        .validate_field(&props(json!({})), "n", "Form")
        .unwrap_err();
    assert_eq!(
        error.message,
        "The prop `n` is marked as required in `Form`, but its value is `undefined`."
    );
}

#[test]
fn test_constraints_pass_absent_and_unmeasurable_values() {
    let checks = [
        matches(Regex::new("^x$").unwrap()),
        min_length(3),
        max_length(1),
        min(10.0),
        max(-10.0),
    ];
    let value = props(json!({"null": null, "number": 5, "text": "abc"}));

    for check in &checks {
        assert!(check.validate_field(&value, "missing", "Form").is_ok());
        assert!(check.validate_field(&value, "null", "Form").is_ok());
    }
    assert!(min_length(10).validate_field(&value, "number", "Form").is_ok());
    assert!(min(10.0).validate_field(&value, "text", "Form").is_ok());
}

#[test]
fn test_length_counts_characters() {
    let value = props(json!({"word": "héllo"}));
    assert!(max_length(5).validate_field(&value, "word", "Form").is_ok());
    assert!(min_length(5).validate_field(&value, "word", "Form").is_ok());

    let error = max_length(4).validate_field(&value, "word", "Form").unwrap_err();
    assert_eq!(error.got.as_deref(), Some("5 characters"));
}

#[test]
fn test_bounds_are_inclusive_and_render_numbers_plainly() {
    let value = props(json!({"a": 1.5, "b": 2}));
    assert!(min(1.5).validate_field(&value, "a", "Form").is_ok());
    assert!(max(1.5).validate_field(&value, "a", "Form").is_ok());

    let error = max(1.5).validate_field(&value, "b", "Form").unwrap_err();
    assert_eq!(
        error.message,
        "Invalid prop `b` supplied to `Form`. Can not be larger than 1.5."
    );
    assert_eq!(error.code, "max");
}

#[test]
fn test_date_bounds() {
    let ceiling = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    let value: Value = [("at", Value::from(late))].into_iter().collect();

    let error = max(ceiling).validate_field(&value, "at", "Event").unwrap_err();
    assert_eq!(
        error.message,
        "Invalid prop `at` supplied to `Event`. Can not be larger than 2026-01-01 00:00:00 UTC."
    );
    assert!(min(ceiling).validate_field(&value, "at", "Event").is_ok());
}

#[test]
fn test_custom_validator_from_fn() {
    let even = Validator::from_fn(|prop: &Prop<'_>, label: &str| {
        match prop.present().and_then(Value::as_f64) {
            Some(n) if n % 2.0 != 0.0 => Err(SchemaError::new(
                prop.path().clone(),
                ErrorKind::ConstraintViolation,
                format!("Invalid prop `{}` supplied to `{}`. Must be even.", prop.name(), label),
            )
            .with_code("even")),
            _ => Ok(()),
        }
    });

    let checks = combine(vec![checkers::number(), even, max(10.0)]);
    let value = props(json!({"a": 4, "b": 3, "c": 12}));
    assert!(checks.validate_field(&value, "a", "Form").is_ok());
    assert_eq!(checks.validate_field(&value, "b", "Form").unwrap_err().code, "even");
    assert_eq!(checks.validate_field(&value, "c", "Form").unwrap_err().code, "max");
}

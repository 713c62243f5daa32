//! Constraint checks and the combinator that merges them.
//!
//! Each factory here returns a [`Validator`] for one independent constraint
//! on a field. [`combine`] merges an ordered list of them into a single
//! validator that reports the first failure, so the order of the list decides
//! which message wins when several constraints are violated at once.
//!
//! Constraint checks never fire on an absent value (missing key or `null`),
//! and they pass values of a type they cannot measure. Type mismatches are
//! reported by the type check that precedes them in the list.
//!
//! # Example
//!
//! ```rust
//! use propcheck::{checkers, combinators, Value};
//! use regex::Regex;
//! use serde_json::json;
//!
//! let code = combinators::combine(vec![
//!     checkers::string(),
//!     combinators::matches(Regex::new("^[A-Z]+$").unwrap()),
//!     combinators::max_length(3),
//! ]);
//!
//! let props = Value::from(json!({"code": "ABCD"}));
//! let error = code.validate_field(&props, "code", "Country").unwrap_err();
//! assert_eq!(
//!     error.message,
//!     "Invalid prop `code` supplied to `Country`. More than 3 characters long."
//! );
//! ```

use std::fmt::Display;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::error::{ErrorKind, SchemaError};
use crate::validator::{Prop, Validator};
use crate::value::Value;

/// Merges `checks` into one validator that runs them in order and returns
/// the first error.
///
/// A single check is returned unchanged, keeping its own required form and
/// messages. An empty list accepts everything. Otherwise the merged
/// validator's required form names the field by its bare key.
pub fn combine(mut checks: Vec<Validator>) -> Validator {
    if checks.len() == 1 {
        if let Some(only) = checks.pop() {
            return only;
        }
    }

    Validator::from_fn(move |prop: &Prop<'_>, label: &str| {
        for check in &checks {
            check.validate(prop, label)?;
        }
        Ok(())
    })
}

/// Fails unless the string value matches `regex`.
pub fn matches(regex: Regex) -> Validator {
    Validator::from_fn(move |prop: &Prop<'_>, label: &str| {
        let Some(s) = prop.present().and_then(Value::as_str) else {
            return Ok(());
        };
        if regex.is_match(s) {
            return Ok(());
        }
        Err(violation(prop, label, "Regular expression validation failed.")
            .with_code("pattern")
            .with_expected(format!("string matching '{}'", regex.as_str()))
            .with_got(s))
    })
}

/// Fails if the string value has fewer than `min` characters.
pub fn min_length(min: usize) -> Validator {
    Validator::from_fn(move |prop: &Prop<'_>, label: &str| {
        let Some(len) = prop.present().and_then(char_len) else {
            return Ok(());
        };
        if len >= min {
            return Ok(());
        }
        Err(
            violation(prop, label, &format!("Less than {} characters long.", min))
                .with_code("min_length")
                .with_expected(format!("at least {} characters", min))
                .with_got(format!("{} characters", len)),
        )
    })
}

/// Fails if the string value has more than `max` characters.
pub fn max_length(max: usize) -> Validator {
    Validator::from_fn(move |prop: &Prop<'_>, label: &str| {
        let Some(len) = prop.present().and_then(char_len) else {
            return Ok(());
        };
        if len <= max {
            return Ok(());
        }
        Err(
            violation(prop, label, &format!("More than {} characters long.", max))
                .with_code("max_length")
                .with_expected(format!("at most {} characters", max))
                .with_got(format!("{} characters", len)),
        )
    })
}

/// An ordered value a field can be bounded by.
pub trait Bound: PartialOrd + Display + Send + Sync + 'static {
    /// Extracts a comparable value of this type, if `value` holds one.
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl Bound for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl Bound for DateTime<Utc> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_date().copied()
    }
}

/// Fails if the value is smaller than `bound` (inclusive lower bound).
pub fn min<B: Bound>(bound: B) -> Validator {
    Validator::from_fn(move |prop: &Prop<'_>, label: &str| {
        let Some(value) = prop.present().and_then(B::from_value) else {
            return Ok(());
        };
        if value < bound {
            return Err(
                violation(prop, label, &format!("Can not be smaller than {}.", bound))
                    .with_code("min")
                    .with_expected(format!(">= {}", bound))
                    .with_got(value.to_string()),
            );
        }
        Ok(())
    })
}

/// Fails if the value is larger than `bound` (inclusive upper bound).
pub fn max<B: Bound>(bound: B) -> Validator {
    Validator::from_fn(move |prop: &Prop<'_>, label: &str| {
        let Some(value) = prop.present().and_then(B::from_value) else {
            return Ok(());
        };
        if value > bound {
            return Err(
                violation(prop, label, &format!("Can not be larger than {}.", bound))
                    .with_code("max")
                    .with_expected(format!("<= {}", bound))
                    .with_got(value.to_string()),
            );
        }
        Ok(())
    })
}

/// Length in Unicode scalar values, for string values only.
fn char_len(value: &Value) -> Option<usize> {
    value.as_str().map(|s| s.chars().count())
}

fn violation(prop: &Prop<'_>, label: &str, detail: &str) -> SchemaError {
    SchemaError::new(
        prop.path().clone(),
        ErrorKind::ConstraintViolation,
        format!(
            "Invalid prop `{}` supplied to `{}`. {}",
            prop.name(),
            label,
            detail
        ),
    )
}

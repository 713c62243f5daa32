//! Built-in type checkers.
//!
//! These are the validators the compiler selects as the base of every field:
//! primitive type checks, the date instance check, enum membership, typed and
//! untyped arrays, and object shapes. Absent values pass unless the required
//! form is used, whose message names the field by its full path.
//!
//! Containers report the first failing child, with the child's key appended
//! to the path, so a nested failure names its exact location (`list[0].key`).

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{ErrorKind, SchemaError};
use crate::path::PathSegment;
use crate::validator::{Prop, Validator};

/// Accepts any value.
pub fn any() -> Validator {
    Validator::builtin(|_: &Prop<'_>, _: &str| Ok(()))
}

/// Requires a string.
pub fn string() -> Validator {
    primitive("string")
}

/// Requires a number.
pub fn number() -> Validator {
    primitive("number")
}

/// Requires a boolean.
pub fn boolean() -> Validator {
    primitive("boolean")
}

/// Requires an object. Dates count as objects; arrays do not.
pub fn object() -> Validator {
    primitive("object")
}

/// Requires an array of anything.
pub fn array() -> Validator {
    primitive("array")
}

fn primitive(expected: &'static str) -> Validator {
    Validator::builtin(move |prop: &Prop<'_>, label: &str| {
        let Some(value) = prop.present() else {
            return Ok(());
        };
        if value.primitive_type() == expected {
            return Ok(());
        }
        Err(type_mismatch(
            prop,
            value.type_name(),
            format!(
                "Invalid prop `{}` of type `{}` supplied to `{}`, expected `{}`.",
                prop.path(),
                value.type_name(),
                label,
                expected
            ),
            expected,
        ))
    })
}

/// Requires a date instance.
pub fn instance_of_date() -> Validator {
    Validator::builtin(|prop: &Prop<'_>, label: &str| {
        let Some(value) = prop.present() else {
            return Ok(());
        };
        if value.as_date().is_some() {
            return Ok(());
        }
        Err(type_mismatch(
            prop,
            value.type_name(),
            format!(
                "Invalid prop `{}` of type `{}` supplied to `{}`, expected instance of `Date`.",
                prop.path(),
                value.class_name(),
                label
            ),
            "Date",
        ))
    })
}

/// Requires a string equal to one of `values`.
///
/// The failure message lists the allowed values as a JSON array in their
/// declared order.
pub fn one_of(values: Vec<String>) -> Validator {
    let rendered = serde_json::to_string(&values).unwrap_or_else(|_| format!("{:?}", values));
    Validator::builtin(move |prop: &Prop<'_>, label: &str| {
        let Some(value) = prop.present() else {
            return Ok(());
        };
        if value
            .as_str()
            .is_some_and(|s| values.iter().any(|allowed| allowed == s))
        {
            return Ok(());
        }
        Err(SchemaError::new(
            prop.path().clone(),
            ErrorKind::ConstraintViolation,
            format!(
                "Invalid prop `{}` of value `{}` supplied to `{}`, expected one of {}.",
                prop.path(),
                value,
                label,
                rendered
            ),
        )
        .with_code("enum")
        .with_expected(format!("one of {}", rendered))
        .with_got(value.to_string()))
    })
}

/// Requires an array whose every element passes `element`.
///
/// Elements are checked in order with the array as their container, so the
/// first failing element's error is reported with its index in the path.
pub fn array_of(element: Validator) -> Validator {
    Validator::builtin(move |prop: &Prop<'_>, label: &str| {
        let Some(value) = prop.present() else {
            return Ok(());
        };
        let Some(items) = value.as_array() else {
            return Err(type_mismatch(
                prop,
                value.primitive_type(),
                format!(
                    "Invalid prop `{}` of type `{}` supplied to `{}`, expected an array.",
                    prop.path(),
                    value.primitive_type(),
                    label
                ),
                "array",
            ));
        };
        for (index, _) in items.iter().enumerate() {
            element.validate(&prop.child(value, PathSegment::index(index)), label)?;
        }
        Ok(())
    })
}

/// Requires an object whose declared fields each pass their validator.
///
/// Fields are checked in declaration order and the first error wins. Keys
/// not declared in `fields` are ignored.
pub fn shape(fields: IndexMap<String, Validator>) -> Validator {
    let fields = Arc::new(fields);
    Validator::builtin(move |prop: &Prop<'_>, label: &str| {
        let Some(value) = prop.present() else {
            return Ok(());
        };
        if value.primitive_type() != "object" {
            return Err(type_mismatch(
                prop,
                value.primitive_type(),
                format!(
                    "Invalid prop `{}` of type `{}` supplied to `{}`, expected `object`.",
                    prop.path(),
                    value.primitive_type(),
                    label
                ),
                "object",
            ));
        }
        for (name, validator) in fields.iter() {
            validator.validate(&prop.child(value, PathSegment::field(name.as_str())), label)?;
        }
        Ok(())
    })
}

fn type_mismatch(
    prop: &Prop<'_>,
    got: &'static str,
    message: String,
    expected: &'static str,
) -> SchemaError {
    SchemaError::new(prop.path().clone(), ErrorKind::TypeMismatch, message)
        .with_expected(expected)
        .with_got(got)
}

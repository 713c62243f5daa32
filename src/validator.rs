//! The validator contract emitted by the compiler.
//!
//! A [`Validator`] checks one field of a container value and reports at most
//! one [`SchemaError`]. Every validator carries its required form, built once
//! at construction, so wrapping never stacks.

use std::fmt;
use std::sync::Arc;

use crate::error::{ErrorKind, SchemaError};
use crate::path::{FieldPath, PathSegment};
use crate::value::Value;

/// A check over one field: `(prop, context label) -> Ok(()) | Err(error)`.
pub type CheckFn = Arc<dyn Fn(&Prop<'_>, &str) -> Result<(), SchemaError> + Send + Sync>;

/// The field a validator is looking at: its container, its key within the
/// container, and the full path from the validated root.
#[derive(Debug, Clone)]
pub struct Prop<'a> {
    container: &'a Value,
    key: PathSegment,
    path: FieldPath,
}

impl<'a> Prop<'a> {
    /// Creates a prop for `key` inside `container`, located under `parent`.
    pub fn new(container: &'a Value, key: PathSegment, parent: &FieldPath) -> Self {
        let path = parent.push(key.clone());
        Self {
            container,
            key,
            path,
        }
    }

    /// Creates a prop for a top-level field of `container`.
    pub fn field(container: &'a Value, name: impl Into<String>) -> Self {
        Self::new(container, PathSegment::field(name), &FieldPath::root())
    }

    /// The raw value under the key, `None` when the key is missing.
    pub fn value(&self) -> Option<&'a Value> {
        self.container.get(&self.key)
    }

    /// The value under the key, treating `null` like a missing key.
    pub fn present(&self) -> Option<&'a Value> {
        self.value().filter(|v| !v.is_null())
    }

    /// How an absent value renders in messages.
    pub fn absent_label(&self) -> &'static str {
        match self.value() {
            Some(Value::Null) => "null",
            _ => "undefined",
        }
    }

    pub fn key(&self) -> &PathSegment {
        &self.key
    }

    /// The bare key, e.g. `key` or `0`.
    pub fn name(&self) -> String {
        self.key.to_string()
    }

    /// The full path, e.g. `list[0].key`.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// A prop for `key` inside this prop's value.
    pub fn child(&self, container: &'a Value, key: PathSegment) -> Prop<'a> {
        Prop::new(container, key, &self.path)
    }
}

/// How the required form names the missing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequiredNaming {
    /// Full path (`list[0].key`), used by the built-in type checkers.
    Path,
    /// Bare key (`key`), used by constraint checks and combined validators.
    Name,
}

/// A compiled field validator.
///
/// Validators are immutable and cheap to clone; clones share the same check
/// closures. They are `Send + Sync` and may be invoked concurrently.
///
/// # Example
///
/// ```rust
/// use propcheck::checkers;
/// use propcheck::{Prop, Value};
/// use serde_json::json;
///
/// let validator = checkers::string().required();
/// let props = Value::from(json!({"name": "Ada"}));
///
/// assert!(validator.validate(&Prop::field(&props, "name"), "User").is_ok());
///
/// let error = validator
///     .validate(&Prop::field(&props, "email"), "User")
///     .unwrap_err();
/// assert_eq!(
///     error.message,
///     "The prop `email` is marked as required in `User`, but its value is `undefined`."
/// );
/// ```
#[derive(Clone)]
pub struct Validator {
    check: CheckFn,
    required_check: CheckFn,
    is_required: bool,
}

impl Validator {
    /// Creates a validator whose required form names the field by its full
    /// path.
    pub(crate) fn builtin<F>(check: F) -> Self
    where
        F: Fn(&Prop<'_>, &str) -> Result<(), SchemaError> + Send + Sync + 'static,
    {
        Self::with_required(Arc::new(check), RequiredNaming::Path)
    }

    /// Creates a validator from a custom check.
    ///
    /// The required form names the field by its bare key. The check itself
    /// decides what an absent value means; the constraint checks in
    /// [`crate::combinators`] all let absent values through.
    pub fn from_fn<F>(check: F) -> Self
    where
        F: Fn(&Prop<'_>, &str) -> Result<(), SchemaError> + Send + Sync + 'static,
    {
        Self::with_required(Arc::new(check), RequiredNaming::Name)
    }

    fn with_required(check: CheckFn, naming: RequiredNaming) -> Self {
        let inner = Arc::clone(&check);
        let required_check: CheckFn = Arc::new(move |prop: &Prop<'_>, label: &str| {
            if prop.present().is_none() {
                return Err(missing(prop, label, naming));
            }
            inner(prop, label)
        });

        Self {
            check,
            required_check,
            is_required: false,
        }
    }

    /// Checks the field identified by `prop`.
    pub fn validate(&self, prop: &Prop<'_>, label: &str) -> Result<(), SchemaError> {
        if self.is_required {
            (self.required_check)(prop, label)
        } else {
            (self.check)(prop, label)
        }
    }

    /// Checks the top-level field `field` of `container`.
    pub fn validate_field(
        &self,
        container: &Value,
        field: &str,
        label: &str,
    ) -> Result<(), SchemaError> {
        self.validate(&Prop::field(container, field), label)
    }

    /// Returns the required form of this validator.
    ///
    /// An absent (missing or `null`) value fails; anything else is delegated
    /// to the base check. Calling this on a validator that is already
    /// required returns an equivalent validator.
    pub fn required(&self) -> Validator {
        Validator {
            is_required: true,
            ..self.clone()
        }
    }

    pub fn is_required(&self) -> bool {
        self.is_required
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("is_required", &self.is_required)
            .finish_non_exhaustive()
    }
}

fn missing(prop: &Prop<'_>, label: &str, naming: RequiredNaming) -> SchemaError {
    let shown = match naming {
        RequiredNaming::Path => prop.path().to_string(),
        RequiredNaming::Name => prop.name(),
    };
    SchemaError::new(
        prop.path().clone(),
        ErrorKind::RequiredMissing,
        format!(
            "The prop `{}` is marked as required in `{}`, but its value is `{}`.",
            shown,
            label,
            prop.absent_label()
        ),
    )
    .with_expected("value")
    .with_got(prop.absent_label())
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Validator>();
    assert_sync::<Validator>();
};

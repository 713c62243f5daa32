//! Validation error types.
//!
//! This module provides [`SchemaError`], the single diagnostic a validator
//! reports for one field, and [`SchemaErrors`] for accumulating the errors of
//! several fields of one document.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::FieldPath;

/// The category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value's runtime type does not match the expected base type.
    TypeMismatch,
    /// The value has the right type but fails a bound, length, pattern or
    /// enum check.
    ConstraintViolation,
    /// A required field has no value.
    RequiredMissing,
}

/// A single validation failure.
///
/// `message` follows fixed templates (backticks and punctuation included) so
/// that callers can compare diagnostics byte for byte. `path` always holds the
/// full location of the offending value, even when the message only names the
/// bare field.
///
/// # Example
///
/// ```rust
/// use propcheck::{ErrorKind, FieldPath, SchemaError};
///
/// let error = SchemaError::new(
///     FieldPath::from_field("key"),
///     ErrorKind::ConstraintViolation,
///     "Invalid prop `key` supplied to `Form`. Regular expression validation failed.",
/// )
/// .with_code("pattern");
///
/// assert_eq!(error.code, "pattern");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Full path to the value that failed validation.
    pub path: FieldPath,
    /// Human-readable message.
    pub message: String,
    /// Failure category.
    pub kind: ErrorKind,
    /// The runtime type or value that was received.
    pub got: Option<String>,
    /// Description of what was expected.
    pub expected: Option<String>,
    /// Machine-readable error code (e.g. `min_length`).
    pub code: String,
}

impl SchemaError {
    /// Creates a new error. The code defaults to one derived from `kind`.
    pub fn new(path: FieldPath, kind: ErrorKind, message: impl Into<String>) -> Self {
        let code = match kind {
            ErrorKind::TypeMismatch => "invalid_type",
            ErrorKind::ConstraintViolation => "constraint",
            ErrorKind::RequiredMissing => "required",
        };
        Self {
            path,
            message: message.into(),
            kind,
            got: None,
            expected: None,
            code: code.to_string(),
        }
    }

    /// Sets the error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the "got" field.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" field.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SchemaError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaError>();
    assert_sync::<SchemaError>();
};

/// A non-empty collection of validation errors, one per failing field.
///
/// # Combining Errors
///
/// ```rust
/// use propcheck::{ErrorKind, FieldPath, SchemaError, SchemaErrors};
/// use stillwater::prelude::*;
///
/// let name = SchemaErrors::single(SchemaError::new(
///     FieldPath::from_field("name"),
///     ErrorKind::RequiredMissing,
///     "The prop `name` is marked as required in `User`, but its value is `undefined`.",
/// ));
/// let age = SchemaErrors::single(SchemaError::new(
///     FieldPath::from_field("age"),
///     ErrorKind::TypeMismatch,
///     "Invalid prop `age` of type `string` supplied to `User`, expected `number`.",
/// ));
///
/// assert_eq!(name.combine(age).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    /// Creates a collection holding a single error.
    pub fn single(error: SchemaError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a `Vec`, or `None` if it is empty.
    pub fn from_vec(errors: Vec<SchemaError>) -> Option<Self> {
        errors
            .into_iter()
            .map(Self::single)
            .reduce(|acc, next| acc.combine(next))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    /// Returns the error reported at `path`, if any.
    pub fn at_path(&self, path: &FieldPath) -> Option<&SchemaError> {
        self.0.iter().find(|e| &e.path == path)
    }

    /// Returns all errors of the given kind.
    pub fn of_kind(&self, kind: ErrorKind) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| e.kind == kind).collect()
    }

    /// Returns all errors with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaErrors>();
    assert_sync::<SchemaErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn error(field: &str, kind: ErrorKind) -> SchemaError {
        SchemaError::new(FieldPath::from_field(field), kind, format!("{} failed", field))
    }

    #[test]
    fn test_default_code_follows_kind() {
        assert_eq!(error("a", ErrorKind::TypeMismatch).code, "invalid_type");
        assert_eq!(error("a", ErrorKind::ConstraintViolation).code, "constraint");
        assert_eq!(error("a", ErrorKind::RequiredMissing).code, "required");
    }

    #[test]
    fn test_builder() {
        let error = error("age", ErrorKind::ConstraintViolation)
            .with_code("min")
            .with_got("3")
            .with_expected(">= 5");

        assert_eq!(error.code, "min");
        assert_eq!(error.got.as_deref(), Some("3"));
        assert_eq!(error.expected.as_deref(), Some(">= 5"));
    }

    #[test]
    fn test_display_is_message() {
        let error = error("key", ErrorKind::TypeMismatch);
        assert_eq!(error.to_string(), "key failed");
    }

    #[test]
    fn test_from_empty_vec_is_none() {
        assert!(SchemaErrors::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn test_lookup_by_path_kind_and_code() {
        let errors = SchemaErrors::single(error("a", ErrorKind::RequiredMissing))
            .combine(SchemaErrors::single(error("b", ErrorKind::TypeMismatch)))
            .combine(SchemaErrors::single(
                error("c", ErrorKind::ConstraintViolation).with_code("pattern"),
            ));

        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.at_path(&FieldPath::from_field("b")).map(|e| e.kind),
            Some(ErrorKind::TypeMismatch)
        );
        assert_eq!(errors.of_kind(ErrorKind::RequiredMissing).len(), 1);
        assert_eq!(errors.with_code("pattern").len(), 1);
        assert!(errors.at_path(&FieldPath::from_field("z")).is_none());
    }

    #[test]
    fn test_display_lists_every_error() {
        let errors = SchemaErrors::single(error("name", ErrorKind::RequiredMissing))
            .combine(SchemaErrors::single(error("email", ErrorKind::TypeMismatch)));
        let display = errors.to_string();

        assert!(display.contains("2 error(s)"));
        assert!(display.contains("1. name failed"));
        assert!(display.contains("2. email failed"));
    }

    #[test]
    fn test_combine_keeps_order() {
        let errors = SchemaErrors::single(error("z", ErrorKind::TypeMismatch))
            .combine(SchemaErrors::single(error("a", ErrorKind::TypeMismatch)));
        let paths: Vec<_> = errors.into_iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["z", "a"]);
    }
}

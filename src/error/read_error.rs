//! Errors raised while reading a schema description from JSON.

use crate::path::FieldPath;

/// Errors that can occur when reading a declarative schema document.
///
/// Reading is best-effort: unknown type names and options that do not apply
/// to a type are ignored. Only input that cannot be given any meaning is
/// rejected.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The document (or a reference table entry) is not a JSON object.
    #[error("schema at '{path}' must be an object, got {got}")]
    NotAnObject { path: FieldPath, got: &'static str },

    /// A `match` option is not a valid regular expression.
    #[error("invalid pattern for '{path}': {source}")]
    InvalidPattern {
        path: FieldPath,
        #[source]
        source: regex::Error,
    },
}

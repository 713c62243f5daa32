//! # Propcheck
//!
//! A schema compiler that turns declarative field descriptions into runtime
//! property validators, plus the constraint combinators those validators are
//! built from.
//!
//! ## Overview
//!
//! A [`SchemaDescription`] lists fields and their declared types: strings
//! with patterns, lengths and enums; numbers and dates with bounds; booleans;
//! free-form maps; nested objects; arrays; and references to other named
//! descriptions held in a [`ReferenceTable`]. The compiler selects a built-in
//! type checker for each field and merges it with the field's constraint
//! checks, producing one [`Validator`] per field.
//!
//! A validator reports at most one error per field. A [`CompiledSchema`]
//! checks every field of a document and accumulates those errors with
//! stillwater's `Validation`, so callers see every failing field at once.
//!
//! ## Core Types
//!
//! - [`Schema`]: Entry point for building field nodes
//! - [`SchemaDescription`]: Field names mapped to nodes, in declaration order
//! - [`Validator`] and [`Prop`]: A compiled field check and the field it looks at
//! - [`SchemaError`]: A single validation error with path, kind and message
//! - [`SchemaErrors`]: A non-empty collection of validation errors
//!
//! ## Example
//!
//! ```rust
//! use propcheck::{compile_schema, ReferenceTable, Schema, SchemaDescription, Value};
//! use serde_json::json;
//!
//! let mut refs = ReferenceTable::new();
//! refs.register("Nested", SchemaDescription::new().field("a", Schema::string()))
//!     .unwrap();
//!
//! let schema = SchemaDescription::new()
//!     .field("title", Schema::string().min_len(1).required())
//!     .field("nested", Schema::reference("Nested"));
//!
//! let compiled = compile_schema(&schema, Some(&refs));
//!
//! let doc = Value::from(json!({"title": "Hi", "nested": {"a": 1}}));
//! let errors = compiled.validate(&doc, "Post").into_result().unwrap_err();
//!
//! assert_eq!(
//!     errors.first().message,
//!     "Invalid prop `nested.a` of type `number` supplied to `Post`, expected `string`."
//! );
//! ```

pub mod checkers;
pub mod combinators;
pub mod compiler;
pub mod error;
pub mod path;
pub mod registry;
pub mod schema;
pub mod validator;
pub mod value;

pub use compiler::{compile_field, compile_schema, CompiledSchema, Compiler};
pub use error::{ErrorKind, ReadError, SchemaError, SchemaErrors};
pub use path::{FieldPath, PathSegment};
pub use registry::{ReferenceTable, RegistryError};
pub use schema::{NodeKind, Schema, SchemaDescription, SchemaNode};
pub use validator::{CheckFn, Prop, Validator};
pub use value::Value;

/// Type alias for validation results using SchemaErrors
pub type ValidationResult<T> = stillwater::Validation<T, SchemaErrors>;

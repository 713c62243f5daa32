//! Error types for validation failures and schema loading.
//!
//! Validation failures are values ([`SchemaError`]), never panics. Loading
//! schemas from JSON and registering references have their own `thiserror`
//! enums, [`ReadError`] and [`crate::RegistryError`].

mod read_error;
mod schema_error;

pub use read_error::ReadError;
pub use schema_error::{ErrorKind, SchemaError, SchemaErrors};

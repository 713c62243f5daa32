//! Schema descriptions: the input of the compiler.
//!
//! A [`SchemaDescription`] maps field names to [`SchemaNode`]s. Nodes can be
//! built in code with the [`Schema`] factory or read from a declarative JSON
//! document with [`reader::read_description`].
//!
//! # Example
//!
//! ```rust
//! use propcheck::{Schema, SchemaDescription};
//!
//! let post = SchemaDescription::new()
//!     .field("title", Schema::string().max_len(120).required())
//!     .field("status", Schema::string().one_of(["draft", "published"]))
//!     .field("author", Schema::reference("User"))
//!     .field("tags", Schema::array(Schema::string()))
//!     .field("meta", Schema::map());
//! ```

mod node;
mod numeric;
pub mod reader;
mod string;

pub use node::{NodeKind, SchemaDescription, SchemaNode};
pub use numeric::{DateBounds, DateSchema, NumberBounds, NumberSchema};
pub use string::{StringConstraints, StringSchema};

/// Entry point for building schema nodes.
///
/// Typed builders (`string`, `number`, `decimal`, `date`) accept
/// constraints; the rest return a [`SchemaNode`] directly. Everything here
/// converts into a `SchemaNode`, so it can be passed straight to
/// [`SchemaDescription::field`].
pub struct Schema;

impl Schema {
    /// Creates a string field.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a number field.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// Creates a decimal field.
    pub fn decimal() -> NumberSchema {
        NumberSchema::decimal()
    }

    /// Creates a date field.
    pub fn date() -> DateSchema {
        DateSchema::new()
    }

    /// Creates a boolean field.
    pub fn boolean() -> SchemaNode {
        SchemaNode::new(NodeKind::Boolean)
    }

    /// Creates a free-form object field.
    pub fn map() -> SchemaNode {
        SchemaNode::new(NodeKind::Map)
    }

    /// Creates a field that refers to the schema registered as `name`.
    ///
    /// If the name cannot be resolved at compile time the field only has to
    /// be an object.
    pub fn reference(name: impl Into<String>) -> SchemaNode {
        SchemaNode::new(NodeKind::ObjectReference {
            reference: Some(name.into()),
        })
    }

    /// Creates an object reference field without a target schema.
    pub fn object_id() -> SchemaNode {
        SchemaNode::new(NodeKind::ObjectReference { reference: None })
    }

    /// Creates an inline object field with the given fields.
    pub fn object(fields: SchemaDescription) -> SchemaNode {
        fields.into()
    }

    /// Creates an array field whose elements must match `element`.
    pub fn array(element: impl Into<SchemaNode>) -> SchemaNode {
        SchemaNode::new(NodeKind::Array(Some(Box::new(element.into()))))
    }

    /// Creates an array field with untyped elements.
    pub fn any_array() -> SchemaNode {
        SchemaNode::new(NodeKind::Array(None))
    }

    /// Creates a field that accepts anything.
    pub fn any() -> SchemaNode {
        SchemaNode::new(NodeKind::Unknown)
    }
}

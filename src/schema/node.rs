//! The schema description tree consumed by the compiler.

use indexmap::IndexMap;

use super::numeric::{DateBounds, NumberBounds};
use super::string::StringConstraints;

/// The declared shape of one field.
///
/// Each variant carries only the constraints that apply to it; a reader that
/// meets an inapplicable constraint drops it when building the node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    String(StringConstraints),
    Number(NumberBounds),
    Decimal(NumberBounds),
    Date(DateBounds),
    Boolean,
    /// A free-form key/value object; keys and values are not typed.
    Map,
    /// A reference to a schema in the reference table, by name.
    ObjectReference { reference: Option<String> },
    /// An inline object with its own declared fields.
    NestedObject(SchemaDescription),
    /// An array, with its element type if one was declared.
    Array(Option<Box<SchemaNode>>),
    /// Anything goes.
    Unknown,
}

/// One field of a schema description: a kind plus the required flag.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    kind: NodeKind,
    required: bool,
}

impl SchemaNode {
    /// Creates a non-required node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }

    /// Marks the node as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the required flag explicitly.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl From<NodeKind> for SchemaNode {
    fn from(kind: NodeKind) -> Self {
        SchemaNode::new(kind)
    }
}

/// A schema description: field names mapped to nodes, in declaration order.
///
/// # Example
///
/// ```rust
/// use propcheck::{Schema, SchemaDescription};
///
/// let user = SchemaDescription::new()
///     .field("name", Schema::string().min_len(1).required())
///     .field("age", Schema::number().min(0.0))
///     .field("tags", Schema::array(Schema::string()));
///
/// assert_eq!(user.len(), 3);
/// assert!(user.get("name").unwrap().is_required());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaDescription {
    fields: IndexMap<String, SchemaNode>,
}

impl SchemaDescription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a field and returns the description.
    pub fn field(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.insert(name, node);
        self
    }

    /// Adds (or replaces) a field in place.
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<SchemaNode>) {
        self.fields.insert(name.into(), node.into());
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SchemaNode)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SchemaNode)> for SchemaDescription {
    fn from_iter<I: IntoIterator<Item = (K, SchemaNode)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A description used as a field becomes a nested object.
impl From<SchemaDescription> for SchemaNode {
    fn from(description: SchemaDescription) -> Self {
        SchemaNode::new(NodeKind::NestedObject(description))
    }
}

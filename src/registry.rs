//! Named schema descriptions for reference resolution.
//!
//! This module provides the [`ReferenceTable`] type that stores named
//! [`SchemaDescription`]s so object-reference fields can be expanded at
//! compile time.

use indexmap::IndexMap;

use crate::schema::{NodeKind, SchemaDescription, SchemaNode};

/// A table of named schema descriptions.
///
/// The table is plain data: it is built up front and then only read by the
/// compiler, so it can be shared freely between threads.
///
/// # Example
///
/// ```rust
/// use propcheck::{ReferenceTable, Schema, SchemaDescription};
///
/// let mut refs = ReferenceTable::new();
///
/// refs.register("Address", SchemaDescription::new()
///     .field("city", Schema::string().required())
/// ).unwrap();
///
/// refs.register("User", SchemaDescription::new()
///     .field("name", Schema::string())
///     .field("address", Schema::reference("Address"))
/// ).unwrap();
///
/// assert!(refs.contains("Address"));
/// assert!(refs.unresolved_refs().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    schemas: IndexMap<String, SchemaDescription>,
}

impl ReferenceTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a description under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use propcheck::{ReferenceTable, SchemaDescription};
    ///
    /// let mut refs = ReferenceTable::new();
    /// refs.register("Empty", SchemaDescription::new()).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(refs.register("Empty", SchemaDescription::new()).is_err());
    /// ```
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: SchemaDescription,
    ) -> Result<(), RegistryError> {
        let name = name.into();

        if self.schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        self.schemas.insert(name, description);
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(
        mut self,
        name: impl Into<String>,
        description: SchemaDescription,
    ) -> Result<Self, RegistryError> {
        self.register(name, description)?;
        Ok(self)
    }

    /// Inserts or replaces a description, returning the previous one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        description: SchemaDescription,
    ) -> Option<SchemaDescription> {
        self.schemas.insert(name.into(), description)
    }

    /// Retrieves a description by name.
    pub fn get(&self, name: &str) -> Option<&SchemaDescription> {
        self.schemas.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Returns the reference names used by registered descriptions that are
    /// not themselves registered, sorted and deduplicated.
    ///
    /// Unresolved references are not an error: the compiler falls back to an
    /// opaque object check for them. This is a lint for callers who want to
    /// catch typos after loading a table.
    ///
    /// # Example
    ///
    /// ```rust
    /// use propcheck::{ReferenceTable, Schema, SchemaDescription};
    ///
    /// let mut refs = ReferenceTable::new();
    /// refs.register("User", SchemaDescription::new()
    ///     .field("team", Schema::reference("Team"))  // Team not registered!
    /// ).unwrap();
    ///
    /// assert_eq!(refs.unresolved_refs(), vec!["Team"]);
    /// ```
    pub fn unresolved_refs(&self) -> Vec<String> {
        let mut all_refs = Vec::new();
        for description in self.schemas.values() {
            collect_refs(description, &mut all_refs);
        }

        let mut unresolved: Vec<String> = all_refs
            .into_iter()
            .filter(|name| !self.schemas.contains_key(name))
            .collect();

        unresolved.sort();
        unresolved.dedup();
        unresolved
    }
}

impl<K: Into<String>> FromIterator<(K, SchemaDescription)> for ReferenceTable {
    /// Later entries replace earlier ones with the same name.
    fn from_iter<I: IntoIterator<Item = (K, SchemaDescription)>>(iter: I) -> Self {
        Self {
            schemas: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn collect_refs(description: &SchemaDescription, refs: &mut Vec<String>) {
    for (_, node) in description.iter() {
        collect_node_refs(node, refs);
    }
}

fn collect_node_refs(node: &SchemaNode, refs: &mut Vec<String>) {
    match node.kind() {
        NodeKind::ObjectReference {
            reference: Some(name),
        } => refs.push(name.clone()),
        NodeKind::NestedObject(fields) => collect_refs(fields, refs),
        NodeKind::Array(Some(element)) => collect_node_refs(element, refs),
        _ => {}
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a description with a name that already exists.
    #[error("schema '{0}' already registered")]
    DuplicateName(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn test_register_and_get() {
        let mut refs = ReferenceTable::new();
        refs.register("Nested", SchemaDescription::new().field("a", Schema::string()))
            .unwrap();

        assert!(refs.contains("Nested"));
        assert_eq!(refs.get("Nested").unwrap().len(), 1);
        assert!(refs.get("Missing").is_none());
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_duplicate_name() {
        let mut refs = ReferenceTable::new();
        refs.register("A", SchemaDescription::new()).unwrap();

        let err = refs.register("A", SchemaDescription::new()).unwrap_err();
        assert_eq!(err.to_string(), "schema 'A' already registered");
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "A"));
    }

    #[test]
    fn test_builder_and_names_order() {
        let refs = ReferenceTable::new()
            .with("B", SchemaDescription::new())
            .unwrap()
            .with("A", SchemaDescription::new())
            .unwrap();
        assert_eq!(refs.names().collect::<Vec<_>>(), vec!["B", "A"]);

        assert!(refs.with("A", SchemaDescription::new()).is_err());
    }

    #[test]
    fn test_unresolved_refs_walks_nested_nodes() {
        let refs: ReferenceTable = vec![
            (
                "User",
                SchemaDescription::new()
                    .field("team", Schema::reference("Team"))
                    .field(
                        "meta",
                        SchemaDescription::new().field("owner", Schema::reference("Owner")),
                    )
                    .field("friends", Schema::array(Schema::reference("User")))
                    .field("blob", Schema::object_id()),
            ),
            (
                "Other",
                SchemaDescription::new().field("team", Schema::reference("Team")),
            ),
        ]
        .into_iter()
        .collect();

        assert_eq!(refs.unresolved_refs(), vec!["Owner", "Team"]);
    }
}

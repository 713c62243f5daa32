//! Field paths for locating values inside nested objects and arrays.
//!
//! A [`FieldPath`] is what validators use to name the exact offending
//! location in a diagnostic, e.g. `list[0].key`.

use std::fmt::{self, Display};

/// One step of a [`FieldPath`]: an object field or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object field (e.g. `key`).
    Field(String),
    /// An array index (e.g. `[0]`).
    Index(usize),
}

impl PathSegment {
    /// Creates a field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates an index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// Renders the bare key: the field name, or the index without brackets.
impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// A path from the root of a validated value down to one field.
///
/// Paths are immutable; `push_*` returns an extended copy so sibling
/// validators can share a parent path.
///
/// # Example
///
/// ```rust
/// use propcheck::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("list")
///     .push_index(0)
///     .push_field("key");
///
/// assert_eq!(path.to_string(), "list[0].key");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates the empty root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path holding a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Returns a copy of this path extended with `segment`.
    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns a copy of this path extended with a field segment.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a copy of this path extended with an index segment.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Returns true if this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the last segment, or `None` for the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i > 0 => write!(f, ".{}", name)?,
                PathSegment::Field(name) => write!(f, "{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_empty() {
        let path = FieldPath::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_field_then_index_then_field() {
        let path = FieldPath::from_field("list").push_index(0).push_field("key");
        assert_eq!(path.to_string(), "list[0].key");
        assert_eq!(path.last(), Some(&PathSegment::field("key")));
    }

    #[test]
    fn test_leading_index_has_no_dot() {
        let path = FieldPath::root().push_index(3).push_field("name");
        assert_eq!(path.to_string(), "[3].name");
    }

    #[test]
    fn test_push_leaves_parent_untouched() {
        let base = FieldPath::from_field("items");
        let first = base.push_index(0);
        let second = base.push_index(1);

        assert_eq!(base.to_string(), "items");
        assert_eq!(first.to_string(), "items[0]");
        assert_eq!(second.to_string(), "items[1]");
    }

    #[test]
    fn test_segment_display_is_bare_key() {
        assert_eq!(PathSegment::field("key").to_string(), "key");
        assert_eq!(PathSegment::index(7).to_string(), "7");
    }
}

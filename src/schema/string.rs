//! String field descriptions.
//!
//! This module provides [`StringConstraints`], the constraints a string field
//! can carry, and [`StringSchema`], a builder for string nodes.

use regex::Regex;

use super::node::{NodeKind, SchemaNode};

/// Constraints declared on a string field.
///
/// When `enum_values` is set it takes precedence: the compiled validator only
/// checks membership and ignores the pattern and length bounds.
#[derive(Debug, Clone, Default)]
pub struct StringConstraints {
    pub pattern: Option<Regex>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub enum_values: Option<Vec<String>>,
}

/// A builder for string fields.
///
/// # Example
///
/// ```rust
/// use propcheck::Schema;
///
/// let username = Schema::string()
///     .min_len(3)
///     .max_len(20)
///     .pattern(r"^[a-z]+$")
///     .unwrap()
///     .required();
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    constraints: StringConstraints,
    required: bool,
}

impl StringSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires at least `min` characters (Unicode scalar values).
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints.min_length = Some(min);
        self
    }

    /// Requires at most `max` characters (Unicode scalar values).
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints.max_length = Some(max);
        self
    }

    /// Requires the value to match `pattern`.
    ///
    /// Returns an error if the pattern is not a valid regular expression.
    ///
    /// # Example
    ///
    /// ```rust
    /// use propcheck::Schema;
    ///
    /// assert!(Schema::string().pattern(r"^\d+$").is_ok());
    /// assert!(Schema::string().pattern(r"[invalid").is_err());
    /// ```
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.constraints.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Requires the value to match an already compiled regex.
    pub fn regex(mut self, regex: Regex) -> Self {
        self.constraints.pattern = Some(regex);
        self
    }

    /// Restricts the value to the given set, in the given order.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn constraints(&self) -> &StringConstraints {
        &self.constraints
    }
}

impl From<StringSchema> for SchemaNode {
    fn from(schema: StringSchema) -> Self {
        SchemaNode::new(NodeKind::String(schema.constraints)).with_required(schema.required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_constraints() {
        let schema = StringSchema::new().min_len(2).max_len(5).pattern("^a").unwrap();
        let constraints = schema.constraints();

        assert_eq!(constraints.min_length, Some(2));
        assert_eq!(constraints.max_length, Some(5));
        assert_eq!(constraints.pattern.as_ref().map(Regex::as_str), Some("^a"));
        assert!(constraints.enum_values.is_none());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(StringSchema::new().pattern("(unclosed").is_err());
    }

    #[test]
    fn test_one_of_keeps_order() {
        let schema = StringSchema::new().one_of(["c", "a", "b"]);
        assert_eq!(
            schema.constraints().enum_values.as_deref(),
            Some(&["c".to_string(), "a".to_string(), "b".to_string()][..])
        );
    }

    #[test]
    fn test_into_node_carries_required() {
        let node: SchemaNode = StringSchema::new().required().into();
        assert!(node.is_required());
        assert!(matches!(node.kind(), NodeKind::String(_)));
    }
}

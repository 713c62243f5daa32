//! Number, decimal and date field descriptions.
//!
//! Numbers and decimals share [`NumberBounds`]; dates use [`DateBounds`].
//! Both bounds are inclusive.

use chrono::{DateTime, Utc};

use super::node::{NodeKind, SchemaNode};

/// Inclusive bounds on a numeric field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Inclusive bounds on a date field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateBounds {
    pub min: Option<DateTime<Utc>>,
    pub max: Option<DateTime<Utc>>,
}

/// A builder for number and decimal fields.
///
/// # Example
///
/// ```rust
/// use propcheck::Schema;
///
/// let percentage = Schema::number().range(0.0..=100.0).required();
/// let price = Schema::decimal().min(0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    bounds: NumberBounds,
    decimal: bool,
    required: bool,
}

impl NumberSchema {
    /// Creates a plain number field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decimal field; it validates exactly like a number.
    pub fn decimal() -> Self {
        Self {
            decimal: true,
            ..Self::default()
        }
    }

    pub fn min(mut self, min: f64) -> Self {
        self.bounds.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.bounds.max = Some(max);
        self
    }

    /// Sets both bounds from an inclusive range.
    pub fn range(self, range: std::ops::RangeInclusive<f64>) -> Self {
        let (min, max) = range.into_inner();
        self.min(min).max(max)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn bounds(&self) -> NumberBounds {
        self.bounds
    }
}

impl From<NumberSchema> for SchemaNode {
    fn from(schema: NumberSchema) -> Self {
        let kind = if schema.decimal {
            NodeKind::Decimal(schema.bounds)
        } else {
            NodeKind::Number(schema.bounds)
        };
        SchemaNode::new(kind).with_required(schema.required)
    }
}

/// A builder for date fields.
#[derive(Debug, Clone, Default)]
pub struct DateSchema {
    bounds: DateBounds,
    required: bool,
}

impl DateSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// The earliest allowed date.
    pub fn min(mut self, min: DateTime<Utc>) -> Self {
        self.bounds.min = Some(min);
        self
    }

    /// The latest allowed date.
    pub fn max(mut self, max: DateTime<Utc>) -> Self {
        self.bounds.max = Some(max);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn bounds(&self) -> DateBounds {
        self.bounds
    }
}

impl From<DateSchema> for SchemaNode {
    fn from(schema: DateSchema) -> Self {
        SchemaNode::new(NodeKind::Date(schema.bounds)).with_required(schema.required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_range_sets_both_bounds() {
        let schema = NumberSchema::new().range(5.0..=10.0);
        assert_eq!(
            schema.bounds(),
            NumberBounds {
                min: Some(5.0),
                max: Some(10.0)
            }
        );
    }

    #[test]
    fn test_decimal_node_kind() {
        let node: SchemaNode = NumberSchema::decimal().min(1.0).into();
        assert!(matches!(node.kind(), NodeKind::Decimal(b) if b.min == Some(1.0)));

        let node: SchemaNode = NumberSchema::new().required().into();
        assert!(matches!(node.kind(), NodeKind::Number(_)));
        assert!(node.is_required());
    }

    #[test]
    fn test_date_bounds() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let schema = DateSchema::new().min(now).max(now);
        assert_eq!(schema.bounds().min, Some(now));
        assert_eq!(schema.bounds().max, Some(now));
    }
}

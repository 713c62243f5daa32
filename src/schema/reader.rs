//! Reading schema descriptions from declarative JSON documents.
//!
//! The document format maps field names to field declarations:
//!
//! - a type name: `"String"`, `"Number"`, `"Decimal"` (or `"Decimal128"`),
//!   `"Date"`, `"Boolean"`, `"Map"`, `"ObjectId"`; anything else (for
//!   example `"Mixed"`) accepts any value;
//! - an array: `[]` for untyped elements, `[<declaration>]` for typed ones;
//! - an object with a `"type"` key plus options: `required`, `match`,
//!   `minlength`, `maxlength`, `enum` (strings), `min`, `max` (numbers, or
//!   RFC 3339 strings for dates), `ref` (object references);
//! - any other object: a nested object whose keys are its fields.
//!
//! Reading is best-effort. Options that do not apply to the declared type, or
//! that have the wrong JSON type, are dropped.
//!
//! # Example
//!
//! ```rust
//! use propcheck::schema::reader::read_description;
//! use serde_json::json;
//!
//! let description = read_description(&json!({
//!     "name": { "type": "String", "required": true, "maxlength": 40 },
//!     "list": [ { "key": "String" } ],
//!     "owner": { "type": "ObjectId", "ref": "User" }
//! }))
//! .unwrap();
//!
//! assert_eq!(description.len(), 3);
//! ```

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::error::ReadError;
use crate::path::FieldPath;
use crate::registry::ReferenceTable;

use super::node::{NodeKind, SchemaDescription, SchemaNode};
use super::numeric::{DateBounds, NumberBounds};
use super::string::StringConstraints;

/// Reads a schema description from a JSON object.
///
/// # Errors
///
/// Returns [`ReadError::NotAnObject`] if `json` is not an object and
/// [`ReadError::InvalidPattern`] if a `match` option is not a valid regex.
pub fn read_description(json: &Json) -> Result<SchemaDescription, ReadError> {
    read_fields(json, &FieldPath::root())
}

/// Reads a reference table: a JSON object mapping names to descriptions.
///
/// # Example
///
/// ```rust
/// use propcheck::schema::reader::read_references;
/// use serde_json::json;
///
/// let refs = read_references(&json!({
///     "Nested": { "a": "String" }
/// }))
/// .unwrap();
///
/// assert!(refs.get("Nested").is_some());
/// ```
pub fn read_references(json: &Json) -> Result<ReferenceTable, ReadError> {
    let entries = as_object(json, &FieldPath::root())?;
    let mut table = ReferenceTable::new();
    for (name, schema) in entries {
        let description = read_fields(schema, &FieldPath::from_field(name.as_str()))?;
        table.insert(name.clone(), description);
    }
    Ok(table)
}

fn read_fields(json: &Json, path: &FieldPath) -> Result<SchemaDescription, ReadError> {
    let entries = as_object(json, path)?;
    let mut description = SchemaDescription::new();
    for (name, declaration) in entries {
        let node = read_node(declaration, &path.push_field(name.as_str()))?;
        description.insert(name.clone(), node);
    }
    Ok(description)
}

fn as_object<'a>(json: &'a Json, path: &FieldPath) -> Result<&'a Map<String, Json>, ReadError> {
    json.as_object().ok_or_else(|| ReadError::NotAnObject {
        path: path.clone(),
        got: json_type_name(json),
    })
}

fn read_node(json: &Json, path: &FieldPath) -> Result<SchemaNode, ReadError> {
    match json {
        Json::String(name) => Ok(SchemaNode::new(kind_for_name(name, path))),
        Json::Array(items) => read_array(items, path),
        Json::Object(options) => match options.get("type") {
            Some(declared) => read_typed(declared, options, path),
            None => Ok(SchemaNode::new(NodeKind::NestedObject(read_fields(json, path)?))),
        },
        other => {
            debug!(path = %path, got = json_type_name(other), "unrecognized declaration");
            Ok(SchemaNode::new(NodeKind::Unknown))
        }
    }
}

fn read_array(items: &[Json], path: &FieldPath) -> Result<SchemaNode, ReadError> {
    let element = match items.first() {
        Some(first) => Some(Box::new(read_node(first, &path.push_index(0))?)),
        None => None,
    };
    Ok(SchemaNode::new(NodeKind::Array(element)))
}

fn read_typed(
    declared: &Json,
    options: &Map<String, Json>,
    path: &FieldPath,
) -> Result<SchemaNode, ReadError> {
    let required = options.get("required") == Some(&Json::Bool(true));

    let node = match declared {
        Json::String(name) => {
            let kind = match kind_for_name(name, path) {
                NodeKind::String(_) => NodeKind::String(string_constraints(options, path)?),
                NodeKind::Number(_) => NodeKind::Number(number_bounds(options)),
                NodeKind::Decimal(_) => NodeKind::Decimal(number_bounds(options)),
                NodeKind::Date(_) => NodeKind::Date(date_bounds(options, path)),
                NodeKind::ObjectReference { .. } => NodeKind::ObjectReference {
                    reference: options.get("ref").and_then(Json::as_str).map(str::to_string),
                },
                other => other,
            };
            SchemaNode::new(kind)
        }
        other => read_node(other, path)?,
    };

    Ok(node.with_required(required))
}

fn kind_for_name(name: &str, path: &FieldPath) -> NodeKind {
    match name.to_ascii_lowercase().as_str() {
        "string" => NodeKind::String(StringConstraints::default()),
        "number" => NodeKind::Number(NumberBounds::default()),
        "decimal" | "decimal128" => NodeKind::Decimal(NumberBounds::default()),
        "date" => NodeKind::Date(DateBounds::default()),
        "boolean" => NodeKind::Boolean,
        "map" => NodeKind::Map,
        "objectid" => NodeKind::ObjectReference { reference: None },
        "mixed" => NodeKind::Unknown,
        _ => {
            debug!(path = %path, type_name = name, "unknown type name, accepting any value");
            NodeKind::Unknown
        }
    }
}

fn string_constraints(
    options: &Map<String, Json>,
    path: &FieldPath,
) -> Result<StringConstraints, ReadError> {
    let pattern = match options.get("match").and_then(Json::as_str) {
        Some(source) => Some(Regex::new(source).map_err(|source| ReadError::InvalidPattern {
            path: path.clone(),
            source,
        })?),
        None => None,
    };

    let enum_values = options.get("enum").and_then(Json::as_array).map(|values| {
        values
            .iter()
            .filter_map(Json::as_str)
            .map(str::to_string)
            .collect()
    });

    Ok(StringConstraints {
        pattern,
        min_length: length_option(options, "minlength"),
        max_length: length_option(options, "maxlength"),
        enum_values,
    })
}

fn length_option(options: &Map<String, Json>, key: &str) -> Option<usize> {
    options
        .get(key)
        .and_then(Json::as_u64)
        .and_then(|n| usize::try_from(n).ok())
}

fn number_bounds(options: &Map<String, Json>) -> NumberBounds {
    NumberBounds {
        min: options.get("min").and_then(Json::as_f64),
        max: options.get("max").and_then(Json::as_f64),
    }
}

fn date_bounds(options: &Map<String, Json>, path: &FieldPath) -> DateBounds {
    let parse = |key: &str| -> Option<DateTime<Utc>> {
        let raw = options.get(key)?.as_str()?;
        match DateTime::parse_from_rfc3339(raw) {
            Ok(date) => Some(date.with_timezone(&Utc)),
            Err(err) => {
                debug!(path = %path, option = key, error = %err, "ignoring unparsable date bound");
                None
            }
        }
    };
    DateBounds {
        min: parse("min"),
        max: parse("max"),
    }
}

fn json_type_name(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

//! Compiling schema descriptions into validators.
//!
//! The compiler walks a [`SchemaDescription`] and selects, for each field, a
//! built-in checker from [`crate::checkers`], merged with the field's
//! constraint checks through [`combinators::combine`]. Object-reference
//! fields are expanded through a [`ReferenceTable`] when the name resolves.
//!
//! Compilation never fails. Unknown kinds accept anything, unresolved
//! references only require an object, and reference cycles or nesting beyond
//! the configured depth flatten to the opaque container check.

use indexmap::IndexMap;
use rayon::prelude::*;
use stillwater::Validation;
use tracing::{debug, warn};

use crate::checkers;
use crate::combinators;
use crate::error::{SchemaError, SchemaErrors};
use crate::path::FieldPath;
use crate::registry::ReferenceTable;
use crate::schema::{
    DateBounds, NodeKind, NumberBounds, SchemaDescription, SchemaNode, StringConstraints,
};
use crate::validator::Validator;
use crate::value::Value;
use crate::ValidationResult;

/// Default limit on container nesting during compilation.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Compiles a description, resolving references through `refs` if given.
///
/// # Example
///
/// ```rust
/// use propcheck::{compile_schema, Schema, SchemaDescription, Value};
/// use serde_json::json;
///
/// let schema = SchemaDescription::new()
///     .field("name", Schema::string().required())
///     .field("age", Schema::number().range(0.0..=150.0));
///
/// let compiled = compile_schema(&schema, None);
///
/// let ok = Value::from(json!({"name": "Ada", "age": 36}));
/// assert!(compiled.validate(&ok, "User").is_success());
///
/// let bad = Value::from(json!({"age": 200}));
/// let errors = compiled.validate(&bad, "User").into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
pub fn compile_schema(schema: &SchemaDescription, refs: Option<&ReferenceTable>) -> CompiledSchema {
    compiler_for(refs).compile(schema)
}

/// Compiles a single field node, resolving references through `refs`.
///
/// # Example
///
/// ```rust
/// use propcheck::{compile_field, Schema, Value};
/// use serde_json::json;
///
/// let validator = compile_field(&Schema::number().min(5.0).into(), None);
/// let props = Value::from(json!({"count": 3}));
///
/// let error = validator.validate_field(&props, "count", "Counter").unwrap_err();
/// assert_eq!(
///     error.message,
///     "Invalid prop `count` supplied to `Counter`. Can not be smaller than 5."
/// );
/// ```
pub fn compile_field(node: &SchemaNode, refs: Option<&ReferenceTable>) -> Validator {
    compiler_for(refs).compile_node(node)
}

fn compiler_for(refs: Option<&ReferenceTable>) -> Compiler<'_> {
    match refs {
        Some(refs) => Compiler::new().with_references(refs),
        None => Compiler::new(),
    }
}

/// A configurable schema compiler.
///
/// # Example
///
/// ```rust
/// use propcheck::{Compiler, ReferenceTable, Schema, SchemaDescription};
///
/// let mut refs = ReferenceTable::new();
/// refs.register("Tag", SchemaDescription::new().field("label", Schema::string()))
///     .unwrap();
///
/// let compiler = Compiler::new()
///     .with_references(&refs)
///     .with_max_depth(8);
///
/// let post = SchemaDescription::new()
///     .field("tags", Schema::array(Schema::reference("Tag")));
/// let compiled = compiler.compile(&post);
/// assert_eq!(compiled.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'r> {
    references: Option<&'r ReferenceTable>,
    max_depth: usize,
}

impl Compiler<'static> {
    /// Creates a compiler without references and the default max depth (100).
    pub fn new() -> Self {
        Self {
            references: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for Compiler<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Compiler<'r> {
    /// Resolves object references through `references`.
    ///
    /// The same table is used at every depth.
    pub fn with_references<'a>(self, references: &'a ReferenceTable) -> Compiler<'a> {
        Compiler {
            references: Some(references),
            max_depth: self.max_depth,
        }
    }

    /// Sets the maximum container nesting depth.
    ///
    /// Containers (nested objects, typed arrays and resolved references)
    /// nested deeper than this compile to the opaque check for their
    /// container type.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Compiles every field of `schema`, in declaration order.
    pub fn compile(&self, schema: &SchemaDescription) -> CompiledSchema {
        CompiledSchema {
            fields: self.compile_fields(schema, &CompileContext::root()),
        }
    }

    /// Compiles a single node as a top-level field.
    pub fn compile_node(&self, node: &SchemaNode) -> Validator {
        self.compile_with(node, &CompileContext::root())
    }

    fn compile_fields(
        &self,
        schema: &SchemaDescription,
        ctx: &CompileContext,
    ) -> IndexMap<String, Validator> {
        schema
            .iter()
            .map(|(name, node)| {
                let validator = self.compile_with(node, &ctx.field(name));
                (name.clone(), validator)
            })
            .collect()
    }

    fn compile_with(&self, node: &SchemaNode, ctx: &CompileContext) -> Validator {
        debug!(path = %ctx.path, required = node.is_required(), "compiling field");

        let validator = match node.kind() {
            NodeKind::String(constraints) => string_validator(constraints),
            NodeKind::Number(bounds) | NodeKind::Decimal(bounds) => number_validator(bounds),
            NodeKind::Date(bounds) => date_validator(bounds),
            NodeKind::Boolean => checkers::boolean(),
            NodeKind::Map => checkers::object(),
            NodeKind::Unknown => checkers::any(),
            NodeKind::Array(None) => checkers::array(),
            NodeKind::Array(Some(element)) => match ctx.descend(self.max_depth) {
                Some(inner) => checkers::array_of(self.compile_with(element, &inner)),
                None => {
                    warn!(path = %ctx.path, max_depth = self.max_depth, "max depth exceeded, checking array only");
                    checkers::array()
                }
            },
            NodeKind::NestedObject(fields) => match ctx.descend(self.max_depth) {
                Some(inner) => checkers::shape(self.compile_fields(fields, &inner)),
                None => {
                    warn!(path = %ctx.path, max_depth = self.max_depth, "max depth exceeded, checking object only");
                    checkers::object()
                }
            },
            NodeKind::ObjectReference { reference } => {
                self.compile_reference(reference.as_deref(), ctx)
            }
        };

        if node.is_required() {
            validator.required()
        } else {
            validator
        }
    }

    fn compile_reference(&self, name: Option<&str>, ctx: &CompileContext) -> Validator {
        let Some(name) = name else {
            return checkers::object();
        };

        let Some(description) = self.references.and_then(|refs| refs.get(name)) else {
            debug!(path = %ctx.path, reference = name, "unresolved reference, checking object only");
            return checkers::object();
        };

        if ctx.is_expanding(name) {
            warn!(path = %ctx.path, reference = name, "circular reference, checking object only");
            return checkers::object();
        }

        match ctx.descend(self.max_depth) {
            Some(inner) => {
                debug!(path = %ctx.path, reference = name, "resolved reference");
                checkers::shape(self.compile_fields(description, &inner.expanding(name)))
            }
            None => {
                warn!(path = %ctx.path, reference = name, max_depth = self.max_depth, "max depth exceeded, checking object only");
                checkers::object()
            }
        }
    }
}

/// Where the compiler is in the description: nesting depth, the reference
/// names being expanded on the current path, and the field path for logs.
#[derive(Debug, Clone)]
struct CompileContext {
    depth: usize,
    expanding: Vec<String>,
    path: FieldPath,
}

impl CompileContext {
    fn root() -> Self {
        Self {
            depth: 0,
            expanding: Vec::new(),
            path: FieldPath::root(),
        }
    }

    fn field(&self, name: &str) -> Self {
        Self {
            path: self.path.push_field(name),
            ..self.clone()
        }
    }

    /// One level deeper, or `None` if that would exceed `max_depth`.
    fn descend(&self, max_depth: usize) -> Option<Self> {
        if self.depth >= max_depth {
            return None;
        }
        Some(Self {
            depth: self.depth + 1,
            ..self.clone()
        })
    }

    fn is_expanding(&self, name: &str) -> bool {
        self.expanding.iter().any(|n| n == name)
    }

    fn expanding(mut self, name: &str) -> Self {
        self.expanding.push(name.to_string());
        self
    }
}

fn string_validator(constraints: &StringConstraints) -> Validator {
    if let Some(values) = &constraints.enum_values {
        return checkers::one_of(values.clone());
    }

    let mut checks = vec![checkers::string()];
    if let Some(pattern) = &constraints.pattern {
        checks.push(combinators::matches(pattern.clone()));
    }
    if let Some(min) = constraints.min_length {
        checks.push(combinators::min_length(min));
    }
    if let Some(max) = constraints.max_length {
        checks.push(combinators::max_length(max));
    }
    combinators::combine(checks)
}

fn number_validator(bounds: &NumberBounds) -> Validator {
    let mut checks = vec![checkers::number()];
    if let Some(min) = bounds.min {
        checks.push(combinators::min(min));
    }
    if let Some(max) = bounds.max {
        checks.push(combinators::max(max));
    }
    combinators::combine(checks)
}

fn date_validator(bounds: &DateBounds) -> Validator {
    let mut checks = vec![checkers::instance_of_date()];
    if let Some(min) = bounds.min {
        checks.push(combinators::min(min));
    }
    if let Some(max) = bounds.max {
        checks.push(combinators::max(max));
    }
    combinators::combine(checks)
}

/// The compiled form of a schema description: one validator per top-level
/// field, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct CompiledSchema {
    fields: IndexMap<String, Validator>,
}

impl CompiledSchema {
    /// The validator for a top-level field.
    pub fn field(&self, name: &str) -> Option<&Validator> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Validator)> {
        self.fields.iter().map(|(name, v)| (name.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates every top-level field of `value`, collecting one error per
    /// failing field.
    ///
    /// A `value` that is not an object is treated as an empty container, so
    /// only required fields fail.
    pub fn validate(&self, value: &Value, label: &str) -> ValidationResult<()> {
        let errors: Vec<SchemaError> = self
            .fields
            .iter()
            .filter_map(|(name, validator)| validator.validate_field(value, name, label).err())
            .collect();

        match SchemaErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }

    /// Converts `value` and validates it.
    pub fn validate_json(&self, value: &serde_json::Value, label: &str) -> ValidationResult<()> {
        self.validate(&Value::from(value.clone()), label)
    }

    /// Validates many documents in parallel; results keep the input order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use propcheck::{compile_schema, Schema, SchemaDescription, Value};
    /// use serde_json::json;
    ///
    /// let compiled = compile_schema(
    ///     &SchemaDescription::new().field("id", Schema::number().required()),
    ///     None,
    /// );
    /// let docs: Vec<Value> = vec![json!({"id": 1}), json!({})]
    ///     .into_iter()
    ///     .map(Value::from)
    ///     .collect();
    ///
    /// let results = compiled.validate_batch(&docs, "Doc");
    /// assert!(results[0].is_success());
    /// assert!(results[1].is_failure());
    /// ```
    pub fn validate_batch(&self, values: &[Value], label: &str) -> Vec<ValidationResult<()>> {
        values
            .par_iter()
            .map(|value| self.validate(value, label))
            .collect()
    }
}

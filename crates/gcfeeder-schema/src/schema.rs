//! Schema descriptors parsed from JSON Schema.
//!
//! Only the subset the form editor can render is modelled. Anything else the
//! parser meets becomes [`SchemaNode::Unsupported`] at that field, so a single
//! exotic property never rejects the whole descriptor.

use std::sync::Arc;

use gcfeeder_errors::SchemaError;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::coerce::{lossy_f64_to_i64, lossy_u64_to_i64};
use crate::path::{DocumentPath, PathSegment};

/// Location of a profile's `config` node inside a store schema.
pub const PROFILE_CONFIG_POINTER: &str = "/properties/profiles/items/properties/config";

/// A declared object property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub node: SchemaNode,
    /// Help text shown next to the field.
    pub description: Option<String>,
}

/// One node of a schema descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Properties in declaration order.
    Object(IndexMap<String, Property>),
    Boolean,
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    /// String restricted to the listed variants.
    StringEnum(Vec<String>),
    Array {
        element: Box<SchemaNode>,
        /// Declared via `minItems`.
        fixed_length: Option<usize>,
    },
    /// Either null or `inner`.
    Nullable(Box<SchemaNode>),
    /// A construct the editor does not implement.
    Unsupported { reason: String },
}

/// Nested `$ref` hops followed before a reference is treated as a cycle.
const MAX_REF_DEPTH: usize = 16;

impl SchemaNode {
    /// Parse a JSON Schema fragment.
    ///
    /// Local `$ref`s (`#/definitions/...`, `#/$defs/...`) resolve against
    /// `value` itself.
    pub fn from_json(value: &Value) -> Self {
        Parser { root: value }.parse(value, 0)
    }

    /// Nesting depth of a numeric array.
    ///
    /// Counts array wrappers down to an integer/number leaf. Returns 0 for
    /// non-arrays and for arrays whose innermost element is not numeric.
    pub fn array_depth(&self) -> usize {
        match self {
            SchemaNode::Array { element, .. } => match element.as_ref() {
                SchemaNode::Integer { .. } | SchemaNode::Number { .. } => 1,
                inner @ SchemaNode::Array { .. } => match inner.array_depth() {
                    0 => 0,
                    depth => depth.saturating_add(1),
                },
                _ => 0,
            },
            _ => 0,
        }
    }

    /// Short name of the node kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaNode::Object(_) => "object",
            SchemaNode::Boolean => "boolean",
            SchemaNode::Integer { .. } => "integer",
            SchemaNode::Number { .. } => "number",
            SchemaNode::StringEnum(_) => "string enum",
            SchemaNode::Array { .. } => "array",
            SchemaNode::Nullable(_) => "nullable",
            SchemaNode::Unsupported { .. } => "unsupported",
        }
    }

    /// Find the node describing `path`, looking through nullable wrappers.
    pub fn resolve(&self, path: &DocumentPath) -> Option<&SchemaNode> {
        path.segments().iter().try_fold(self, |node, segment| {
            match (node.unwrap_nullable(), segment) {
                (SchemaNode::Object(props), PathSegment::Key(key)) => {
                    props.get(key).map(|p| &p.node)
                }
                (SchemaNode::Array { element, .. }, PathSegment::Index(_)) => {
                    Some(element.as_ref())
                }
                _ => None,
            }
        })
    }

    /// The inner node of a nullable, or `self`.
    pub fn unwrap_nullable(&self) -> &SchemaNode {
        match self {
            SchemaNode::Nullable(inner) => inner.as_ref(),
            other => other,
        }
    }
}

fn unsupported(reason: impl Into<String>) -> SchemaNode {
    let reason = reason.into();
    debug!(reason = %reason, "unsupported schema construct");
    SchemaNode::Unsupported { reason }
}

fn is_null_schema(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some("null")
}

fn json_to_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_u64().map(lossy_u64_to_i64))
        .or_else(|| value.as_f64().map(lossy_f64_to_i64))
}

/// Walks a JSON Schema document, resolving local references against `root`.
struct Parser<'a> {
    root: &'a Value,
}

impl Parser<'_> {
    fn parse(&self, value: &Value, refs: usize) -> SchemaNode {
        let Some(obj) = value.as_object() else {
            return unsupported("schema node is not an object");
        };

        if let Some(reference) = obj.get("$ref") {
            return self.parse_ref(reference, refs);
        }
        if let Some(variants) = obj.get("anyOf") {
            return self.parse_any_of(variants, refs);
        }

        match obj.get("type") {
            Some(Value::String(ty)) => self.parse_typed(ty, value, refs),
            Some(Value::Array(types)) => self.parse_type_list(types, value, refs),
            Some(_) => unsupported("'type' must be a string or a list"),
            None if obj.contains_key("enum") => self.parse_typed("string", value, refs),
            None if obj.contains_key("properties") => self.parse_typed("object", value, refs),
            None => unsupported("missing 'type'"),
        }
    }

    fn parse_ref(&self, reference: &Value, refs: usize) -> SchemaNode {
        let Some(pointer) = reference.as_str().and_then(|r| r.strip_prefix('#')) else {
            return unsupported("only local '$ref's are supported");
        };
        if refs >= MAX_REF_DEPTH {
            return unsupported(format!("'$ref' chain too deep at '#{pointer}'"));
        }
        match self.root.pointer(pointer) {
            Some(target) => self.parse(target, refs.saturating_add(1)),
            None => unsupported(format!("unresolved '$ref' '#{pointer}'")),
        }
    }

    fn parse_any_of(&self, variants: &Value, refs: usize) -> SchemaNode {
        let Some(variants) = variants.as_array() else {
            return unsupported("'anyOf' must be a list");
        };
        match variants.as_slice() {
            [a, b] if is_null_schema(a) && !is_null_schema(b) => {
                SchemaNode::Nullable(Box::new(self.parse(b, refs)))
            }
            [a, b] if is_null_schema(b) && !is_null_schema(a) => {
                SchemaNode::Nullable(Box::new(self.parse(a, refs)))
            }
            _ => unsupported("'anyOf' is only supported as a two-way nullable"),
        }
    }

    fn parse_type_list(&self, types: &[Value], value: &Value, refs: usize) -> SchemaNode {
        let names: Vec<&str> = types.iter().filter_map(Value::as_str).collect();
        match names.as_slice() {
            [single] => self.parse_typed(single, value, refs),
            ["null", ty] | [ty, "null"] if *ty != "null" => {
                SchemaNode::Nullable(Box::new(self.parse_typed(ty, value, refs)))
            }
            _ => unsupported("type lists are only supported as a two-way nullable"),
        }
    }

    fn parse_typed(&self, ty: &str, value: &Value, refs: usize) -> SchemaNode {
        match ty {
            "object" => self.parse_object(value, refs),
            "boolean" => SchemaNode::Boolean,
            "integer" => SchemaNode::Integer {
                min: value.get("minimum").and_then(json_to_i64),
                max: value.get("maximum").and_then(json_to_i64),
            },
            "number" => SchemaNode::Number {
                min: value.get("minimum").and_then(Value::as_f64),
                max: value.get("maximum").and_then(Value::as_f64),
            },
            "string" => parse_string(value),
            "array" => self.parse_array(value, refs),
            other => unsupported(format!("unknown type '{other}'")),
        }
    }

    fn parse_object(&self, value: &Value, refs: usize) -> SchemaNode {
        let props = value
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, prop)| {
                        let property = Property {
                            node: self.parse(prop, refs),
                            description: prop
                                .get("description")
                                .and_then(Value::as_str)
                                .map(str::to_string),
                        };
                        (name.clone(), property)
                    })
                    .collect()
            })
            .unwrap_or_default();
        SchemaNode::Object(props)
    }

    fn parse_array(&self, value: &Value, refs: usize) -> SchemaNode {
        let element = value.get("items").map_or_else(
            || unsupported("array without 'items'"),
            |items| self.parse(items, refs),
        );
        let fixed_length = value
            .get("minItems")
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok());
        SchemaNode::Array {
            element: Box::new(element),
            fixed_length,
        }
    }
}

fn parse_string(value: &Value) -> SchemaNode {
    let Some(variants) = value.get("enum").and_then(Value::as_array) else {
        return unsupported("non-enum strings unsupported");
    };
    let names: Option<Vec<String>> = variants
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect();
    match names {
        Some(names) if !names.is_empty() => SchemaNode::StringEnum(names),
        Some(_) => unsupported("empty string enum"),
        None => unsupported("enum variants must be strings"),
    }
}

/// The schema of one profile's `config` object, shared read-only.
#[derive(Debug, Clone)]
pub struct ProfileSchema {
    config: Arc<SchemaNode>,
}

impl ProfileSchema {
    /// Wrap an already-built config node.
    pub fn new(config: SchemaNode) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Parse a JSON Schema document.
    ///
    /// Accepts either a full store schema, in which case the node at
    /// [`PROFILE_CONFIG_POINTER`] is used, or a bare profile config schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDescriptor`] if the text is not JSON or
    /// the selected node is not an object schema.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| SchemaError::InvalidDescriptor(format!("not valid JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Same as [`from_json_str`](Self::from_json_str) for a parsed value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDescriptor`] if the selected node is not
    /// an object schema.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let node = value.pointer(PROFILE_CONFIG_POINTER).unwrap_or(value);
        match (Parser { root: value }).parse(node, 0) {
            config @ SchemaNode::Object(_) => Ok(Self::new(config)),
            other => Err(SchemaError::InvalidDescriptor(format!(
                "profile config schema must be an object, found {other:?}"
            ))),
        }
    }

    /// The root node of a profile's config.
    pub fn config(&self) -> &SchemaNode {
        &self.config
    }

    /// Shared handle to the root node.
    pub fn shared(&self) -> Arc<SchemaNode> {
        Arc::clone(&self.config)
    }

    /// Find the node describing `path` inside a profile config.
    pub fn resolve(&self, path: &DocumentPath) -> Option<&SchemaNode> {
        self.config.resolve(path)
    }
}

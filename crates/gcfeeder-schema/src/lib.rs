//! Schema descriptors and structured documents for gcfeeder profiles
//!
//! A profile's `config` is a [`DocumentValue`] tree described by a
//! [`SchemaNode`] tree parsed from JSON Schema. [`DocumentPath`] addresses a
//! node in either tree, and [`coerce`] holds the saturating numeric conversions
//! and bound clamping used whenever a number is edited.
//!
//! # Example
//!
//! ```
//! use gcfeeder_schema::{DocumentPath, DocumentValue, ProfileSchema, SchemaNode};
//!
//! let schema = ProfileSchema::from_json_str(r#"{
//!     "type": "object",
//!     "properties": {
//!         "enabled": { "type": "boolean" },
//!         "deadzone": { "type": "integer", "minimum": 0, "maximum": 127 }
//!     }
//! }"#)?;
//!
//! let doc: DocumentValue = serde_json::from_str(r#"{ "enabled": true, "deadzone": 12 }"#)?;
//! let path = DocumentPath::root().key("deadzone");
//! assert_eq!(schema.resolve(&path), Some(&SchemaNode::Integer { min: Some(0), max: Some(127) }));
//! assert_eq!(doc.pointer(&path).and_then(DocumentValue::as_i64), Some(12));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod coerce;
pub mod document;
pub mod path;
pub mod schema;

pub use document::{DocumentMap, DocumentValue};
pub use path::{DocumentPath, PathSegment};
pub use schema::{PROFILE_CONFIG_POINTER, ProfileSchema, Property, SchemaNode};

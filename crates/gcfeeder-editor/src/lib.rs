//! Schema-driven form editor for gcfeeder profile documents.
//!
//! [`SchemaEditor`] walks a [`SchemaNode`](gcfeeder_schema::SchemaNode) and
//! the matching [`DocumentValue`](gcfeeder_schema::DocumentValue) together,
//! drawing one widget per field through an [`EditorUi`] implementation and
//! writing edits straight back into the document.
//!
//! Problems are field-local: a missing property or an unsupported construct
//! produces a diagnostic in the [`EditReport`] and a warning in place of the
//! field, while the rest of the form keeps rendering.
//!
//! Headless callers (tests, scripted tools) use [`SchemaEditor::apply`] with
//! an [`EditOp`] at a [`DocumentPath`](gcfeeder_schema::DocumentPath).
//!
//! ```
//! use gcfeeder_editor::{EditOp, SchemaEditor};
//! use gcfeeder_schema::{DocumentPath, DocumentValue, SchemaNode};
//!
//! let schema = SchemaNode::from_json(&serde_json::json!({
//!     "type": "object",
//!     "properties": { "deadzone": { "type": "integer", "minimum": 0, "maximum": 40 } }
//! }));
//! let mut doc: DocumentValue = serde_json::json!({ "deadzone": 10 }).into();
//!
//! let editor = SchemaEditor::standard();
//! let path = DocumentPath::root().key("deadzone");
//! assert_eq!(editor.apply(&schema, &mut doc, &path, EditOp::SetInteger(90)), Ok(true));
//! assert_eq!(doc.pointer(&path), Some(&DocumentValue::Integer(40)));
//! ```

#![deny(static_mut_refs)]
#![deny(unused_must_use)]

pub mod defaults;
pub mod editor;
pub mod ui;

pub use defaults::DefaultFactories;
pub use editor::{EditOp, EditReport, SchemaEditor};
pub use ui::{EditorUi, Field};

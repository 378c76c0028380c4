//! Recursive schema-driven document editing.

use gcfeeder_errors::SchemaError;
use gcfeeder_schema::coerce::{clamp_integer, clamp_number, lossy_i64_to_f64};
use gcfeeder_schema::{DocumentPath, DocumentValue, PathSegment, Property, SchemaNode};
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::defaults::DefaultFactories;
use crate::ui::{EditorUi, Field};

/// Outcome of one pass over a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditReport {
    /// Whether any value was modified.
    pub changed: bool,
    /// Field-local problems found while rendering.
    pub diagnostics: Vec<SchemaError>,
}

impl EditReport {
    /// No diagnostics were raised.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics that stopped a subtree from rendering.
    pub fn mismatches(&self) -> impl Iterator<Item = &SchemaError> {
        self.diagnostics.iter().filter(|d| d.is_subtree_fatal())
    }
}

/// A single path-addressed edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Flip a boolean.
    Toggle,
    SetBool(bool),
    /// Set an integer (or number) field; clamped to the declared bounds.
    SetInteger(i64),
    /// Set a number field; clamped to the declared bounds.
    SetNumber(f64),
    /// Pick one of the declared string variants.
    SelectVariant(String),
    /// Make a nullable field present (from its default) or absent.
    SetPresent(bool),
}

impl EditOp {
    fn name(&self) -> &'static str {
        match self {
            EditOp::Toggle => "toggle",
            EditOp::SetBool(_) => "set-bool",
            EditOp::SetInteger(_) => "set-integer",
            EditOp::SetNumber(_) => "set-number",
            EditOp::SelectVariant(_) => "select-variant",
            EditOp::SetPresent(_) => "set-present",
        }
    }
}

/// Renders and edits a document against its schema.
///
/// The editor never persists anything. Callers mark their buffer dirty when
/// [`EditReport::changed`] (or the `bool` from [`apply`](Self::apply)) is true.
///
/// Supported shapes:
///
/// - objects, recursed in declaration order; a property missing from the
///   document is reported and skipped, its siblings still render
/// - booleans, integers and numbers, with bounds clamped after every edit
/// - string enums; free-form strings are reported as unsupported
/// - fixed-length numeric arrays of depth 1 (a row of slots) or 2 (a grid)
/// - two-way nullables, made present from a [`DefaultFactories`] entry
#[derive(Debug, Default)]
pub struct SchemaEditor {
    defaults: DefaultFactories,
}

impl SchemaEditor {
    pub fn new(defaults: DefaultFactories) -> Self {
        Self { defaults }
    }

    /// Editor with [`DefaultFactories::standard`].
    pub fn standard() -> Self {
        Self::new(DefaultFactories::standard())
    }

    /// Draw the whole form through `ui`, applying any edits it reports.
    pub fn edit<U: EditorUi + ?Sized>(
        &self,
        ui: &mut U,
        schema: &SchemaNode,
        document: &mut DocumentValue,
    ) -> EditReport {
        let mut report = EditReport::default();
        let root = DocumentPath::root();
        match schema {
            SchemaNode::Object(props) => {
                self.edit_properties(ui, props, document, &root, &mut report);
            }
            other => {
                let field = Field {
                    label: "",
                    path: &root,
                    description: None,
                };
                self.edit_node(ui, &field, other, document, &mut report);
            }
        }
        report
    }

    fn edit_properties<U: EditorUi + ?Sized>(
        &self,
        ui: &mut U,
        props: &IndexMap<String, Property>,
        value: &mut DocumentValue,
        path: &DocumentPath,
        report: &mut EditReport,
    ) {
        let kind = value.kind();
        let Some(map) = value.as_object_mut() else {
            let field = Field {
                label: "",
                path,
                description: None,
            };
            let error = SchemaError::mismatch(path.to_string(), format!("expected object, found {kind}"));
            diagnose(ui, &field, error, report);
            return;
        };

        for (name, Property { node, description }) in props {
            let child_path = path.with_key(name);
            let field = Field {
                label: name,
                path: &child_path,
                description: description.as_deref(),
            };
            match map.get_mut(name) {
                Some(child) => self.edit_node(ui, &field, node, child, report),
                None => {
                    let error = SchemaError::mismatch(
                        child_path.to_string(),
                        "property missing from document",
                    );
                    diagnose(ui, &field, error, report);
                }
            }
        }
    }

    fn edit_node<U: EditorUi + ?Sized>(
        &self,
        ui: &mut U,
        field: &Field<'_>,
        node: &SchemaNode,
        value: &mut DocumentValue,
        report: &mut EditReport,
    ) {
        match node {
            SchemaNode::Object(props) => {
                if value.as_object().is_none() {
                    mismatch_kind(ui, field, "object", value, report);
                    return;
                }
                if ui.begin_object(field) {
                    self.edit_properties(ui, props, value, field.path, report);
                    ui.end_object();
                }
            }
            SchemaNode::Boolean => {
                let DocumentValue::Bool(current) = value else {
                    mismatch_kind(ui, field, "bool", value, report);
                    return;
                };
                if ui.checkbox(field, current) {
                    mark_changed(field, report);
                }
            }
            SchemaNode::Integer { min, max } => {
                let Some(mut current) = value.as_i64() else {
                    mismatch_kind(ui, field, "integer", value, report);
                    return;
                };
                if ui.input_integer(field, &mut current) {
                    *value = DocumentValue::Integer(clamp_integer(current, *min, *max));
                    mark_changed(field, report);
                }
            }
            SchemaNode::Number { min, max } => {
                let Some(mut current) = value.as_f64() else {
                    mismatch_kind(ui, field, "number", value, report);
                    return;
                };
                if ui.input_number(field, &mut current) {
                    *value = DocumentValue::Float(clamp_number(current, *min, *max));
                    mark_changed(field, report);
                }
            }
            SchemaNode::StringEnum(variants) => {
                let Some(current) = value.as_str() else {
                    mismatch_kind(ui, field, "string", value, report);
                    return;
                };
                let selected = ui
                    .select_variant(field, current, variants)
                    .and_then(|index| variants.get(index))
                    .filter(|variant| variant.as_str() != current)
                    .cloned();
                if let Some(variant) = selected {
                    *value = DocumentValue::String(variant);
                    mark_changed(field, report);
                }
            }
            SchemaNode::Array { .. } => self.edit_array(ui, field, node, value, report),
            SchemaNode::Nullable(inner) => self.edit_nullable(ui, field, inner, value, report),
            SchemaNode::Unsupported { reason } => {
                let error = SchemaError::unsupported(field.path.to_string(), reason.clone());
                diagnose(ui, field, error, report);
            }
        }
    }

    fn edit_nullable<U: EditorUi + ?Sized>(
        &self,
        ui: &mut U,
        field: &Field<'_>,
        inner: &SchemaNode,
        value: &mut DocumentValue,
        report: &mut EditReport,
    ) {
        let present = !value.is_null();
        if ui.presence_toggle(field, present) {
            if present {
                *value = DocumentValue::Null;
                mark_changed(field, report);
            } else {
                let key = field.path.last_key().unwrap_or_default();
                match self.defaults.create(key) {
                    Some(default) => {
                        *value = default;
                        mark_changed(field, report);
                    }
                    None => {
                        let error = SchemaError::unsupported(
                            field.path.to_string(),
                            format!("no default value registered for '{key}'"),
                        );
                        diagnose(ui, field, error, report);
                    }
                }
            }
        }

        if !value.is_null() {
            self.edit_node(ui, field, inner, value, report);
        }
    }

    fn edit_array<U: EditorUi + ?Sized>(
        &self,
        ui: &mut U,
        field: &Field<'_>,
        node: &SchemaNode,
        value: &mut DocumentValue,
        report: &mut EditReport,
    ) {
        let SchemaNode::Array {
            element,
            fixed_length,
        } = node
        else {
            return;
        };
        let depth = node.array_depth();
        let columns = match supported_length(depth, *fixed_length) {
            Ok(columns) => columns,
            Err(reason) => {
                let error = SchemaError::unsupported(field.path.to_string(), reason);
                diagnose(ui, field, error, report);
                return;
            }
        };

        let kind = value.kind();
        let Some(items) = value.as_array_mut() else {
            let error = SchemaError::mismatch(field.path.to_string(), format!("expected array, found {kind}"));
            diagnose(ui, field, error, report);
            return;
        };
        if items.len() < columns {
            let error = SchemaError::mismatch(
                field.path.to_string(),
                format!("expected {columns} elements, found {}", items.len()),
            );
            diagnose(ui, field, error, report);
            return;
        }

        if depth == 1 {
            ui.begin_grid(field, columns, 1);
            for (index, item) in items.iter_mut().take(columns).enumerate() {
                let path = field.path.with_index(index);
                let label = format!("[{index}]");
                let cell = Field {
                    label: &label,
                    path: &path,
                    description: None,
                };
                self.edit_node(ui, &cell, element, item, report);
            }
            ui.end_grid();
            return;
        }

        let SchemaNode::Array { element: leaf, .. } = element.as_ref() else {
            return;
        };
        if let Some(column) = items.iter().take(columns).position(|c| c.as_array().is_none()) {
            let path = field.path.with_index(column);
            let error = SchemaError::mismatch(path.to_string(), "expected array column");
            diagnose(ui, field, error, report);
            return;
        }
        let rows = items
            .iter()
            .take(columns)
            .filter_map(DocumentValue::as_array)
            .map(Vec::len)
            .max()
            .unwrap_or(0);

        ui.begin_grid(field, columns, rows);
        for row in 0..rows {
            for column in 0..columns {
                let cell_value = items
                    .get_mut(column)
                    .and_then(DocumentValue::as_array_mut)
                    .and_then(|cells| cells.get_mut(row));
                let Some(cell_value) = cell_value else {
                    ui.empty_cell();
                    continue;
                };
                let path = field.path.with_index(column).index(row);
                let label = format!("[{column}][{row}]");
                let cell = Field {
                    label: &label,
                    path: &path,
                    description: None,
                };
                self.edit_node(ui, &cell, leaf, cell_value, report);
            }
        }
        ui.end_grid();
    }

    /// Apply one edit at `path`.
    ///
    /// Returns whether the document changed.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::InvalidEdit`] if `path` is not declared by `schema`,
    ///   the op does not fit the field type, or a variant is not declared
    /// - [`SchemaError::Mismatch`] if the document lacks the node or holds a
    ///   value of the wrong kind
    /// - [`SchemaError::Unsupported`] for unsupported fields, or when making a
    ///   nullable present without a registered default
    ///
    /// The document is unchanged on error.
    pub fn apply(
        &self,
        schema: &SchemaNode,
        document: &mut DocumentValue,
        path: &DocumentPath,
        op: EditOp,
    ) -> Result<bool, SchemaError> {
        let result = self.apply_inner(schema, document, path, op);
        match &result {
            Ok(true) => debug!(path = %path, "edit applied"),
            Ok(false) => {}
            Err(error) => warn!(path = %path, error = %error, "edit rejected"),
        }
        result
    }

    fn apply_inner(
        &self,
        schema: &SchemaNode,
        document: &mut DocumentValue,
        path: &DocumentPath,
        op: EditOp,
    ) -> Result<bool, SchemaError> {
        let at = path.to_string();
        let node = schema
            .resolve(path)
            .ok_or_else(|| SchemaError::invalid_edit(&at, "path is not declared by the schema"))?;
        check_array_shapes(schema, path)?;
        let target = document
            .pointer_mut(path)
            .ok_or_else(|| SchemaError::mismatch(&at, "missing from document"))?;

        if let EditOp::SetPresent(present) = op {
            if !matches!(node, SchemaNode::Nullable(_)) {
                return Err(SchemaError::invalid_edit(at, "field is not nullable"));
            }
            return match (present, target.is_null()) {
                (false, true) | (true, false) => Ok(false),
                (false, false) => {
                    *target = DocumentValue::Null;
                    Ok(true)
                }
                (true, true) => {
                    let key = path.last_key().unwrap_or_default();
                    let default = self.defaults.create(key).ok_or_else(|| {
                        SchemaError::unsupported(&at, format!("no default value registered for '{key}'"))
                    })?;
                    *target = default;
                    Ok(true)
                }
            };
        }

        let node = match node {
            SchemaNode::Nullable(_) if target.is_null() => {
                return Err(SchemaError::invalid_edit(at, "field is absent; make it present first"));
            }
            SchemaNode::Nullable(inner) => inner.as_ref(),
            other => other,
        };

        let kind = target.kind();
        let wrong_kind = |expected: &str| SchemaError::mismatch(&at, format!("expected {expected}, found {kind}"));

        match (node, op) {
            (SchemaNode::Boolean, EditOp::Toggle) => {
                let DocumentValue::Bool(current) = target else {
                    return Err(wrong_kind("bool"));
                };
                *current = !*current;
                Ok(true)
            }
            (SchemaNode::Boolean, EditOp::SetBool(new)) => {
                let DocumentValue::Bool(current) = target else {
                    return Err(wrong_kind("bool"));
                };
                let changed = *current != new;
                *current = new;
                Ok(changed)
            }
            (SchemaNode::Integer { min, max }, EditOp::SetInteger(new)) => {
                if !target.is_number() {
                    return Err(wrong_kind("integer"));
                }
                let new = clamp_integer(new, *min, *max);
                let changed = *target != DocumentValue::Integer(new);
                *target = DocumentValue::Integer(new);
                Ok(changed)
            }
            (SchemaNode::Number { min, max }, EditOp::SetNumber(new)) => {
                set_number(target, clamp_number(new, *min, *max)).ok_or_else(|| wrong_kind("number"))
            }
            (SchemaNode::Number { min, max }, EditOp::SetInteger(new)) => {
                let new = clamp_number(lossy_i64_to_f64(new), *min, *max);
                set_number(target, new).ok_or_else(|| wrong_kind("number"))
            }
            (SchemaNode::StringEnum(variants), EditOp::SelectVariant(new)) => {
                if !variants.contains(&new) {
                    return Err(SchemaError::invalid_edit(
                        &at,
                        format!("'{new}' is not a declared variant"),
                    ));
                }
                let DocumentValue::String(current) = target else {
                    return Err(wrong_kind("string"));
                };
                let changed = *current != new;
                *current = new;
                Ok(changed)
            }
            (SchemaNode::Unsupported { reason }, _) => Err(SchemaError::unsupported(&at, reason.clone())),
            (node, op) => Err(SchemaError::invalid_edit(
                &at,
                format!("{} does not apply to a {} field", op.name(), node.kind()),
            )),
        }
    }
}

/// Fixed length of a renderable array, or why it cannot be rendered.
fn supported_length(depth: usize, fixed_length: Option<usize>) -> Result<usize, String> {
    if !(1..=2).contains(&depth) {
        return Err(format!("numeric arrays of depth 1 or 2 only, found depth {depth}"));
    }
    fixed_length.ok_or_else(|| "arrays without minItems unsupported".to_string())
}

/// Reject paths that reach into arrays the form cannot render, or past the
/// declared length of one it can. Grid columns are not length-checked.
fn check_array_shapes(schema: &SchemaNode, path: &DocumentPath) -> Result<(), SchemaError> {
    let mut node = schema;
    let mut walked = DocumentPath::root();
    let mut in_column = false;
    for segment in path.segments() {
        let current = node.unwrap_nullable();
        match (current, segment) {
            (SchemaNode::Object(props), PathSegment::Key(key)) => {
                let Some(property) = props.get(key) else {
                    return Ok(());
                };
                node = &property.node;
                in_column = false;
            }
            (SchemaNode::Array { element, fixed_length }, PathSegment::Index(index)) => {
                if in_column {
                    in_column = false;
                } else {
                    let depth = current.array_depth();
                    let length = supported_length(depth, *fixed_length)
                        .map_err(|reason| SchemaError::unsupported(walked.to_string(), reason))?;
                    if *index >= length {
                        return Err(SchemaError::unsupported(
                            walked.to_string(),
                            format!("index {index} is beyond the {length} declared elements"),
                        ));
                    }
                    in_column = depth == 2;
                }
                node = element.as_ref();
            }
            _ => return Ok(()),
        }
        walked = walked.child(segment.clone());
    }
    Ok(())
}

/// Write a float, reporting whether the stored value changed. `None` if the
/// target is not numeric.
fn set_number(target: &mut DocumentValue, new: f64) -> Option<bool> {
    let changed = match target {
        DocumentValue::Float(old) => old.to_bits() != new.to_bits(),
        DocumentValue::Integer(_) => true,
        _ => return None,
    };
    *target = DocumentValue::Float(new);
    Some(changed)
}

fn mark_changed(field: &Field<'_>, report: &mut EditReport) {
    debug!(path = %field.path, "field edited");
    report.changed = true;
}

fn mismatch_kind<U: EditorUi + ?Sized>(
    ui: &mut U,
    field: &Field<'_>,
    expected: &str,
    found: &DocumentValue,
    report: &mut EditReport,
) {
    let error = SchemaError::mismatch(
        field.path.to_string(),
        format!("expected {expected}, found {}", found.kind()),
    );
    diagnose(ui, field, error, report);
}

fn diagnose<U: EditorUi + ?Sized>(ui: &mut U, field: &Field<'_>, error: SchemaError, report: &mut EditReport) {
    ui.warning(field, &error.to_string());
    debug!(path = %field.path, error = %error, "field-local schema diagnostic");
    report.diagnostics.push(error);
}

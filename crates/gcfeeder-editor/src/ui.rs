//! Rendering seam between the editor and an immediate-mode toolkit.

use gcfeeder_schema::DocumentPath;

/// Identity of one rendered field.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    /// Short label: the property name or `[column][row]` for grid cells.
    pub label: &'a str,
    /// Full path of the field, unique within the form.
    pub path: &'a DocumentPath,
    /// Help text from the schema.
    pub description: Option<&'a str>,
}

/// Widgets the editor draws with.
///
/// Every call is made once per frame for every visible field. Methods that
/// take `&mut` values edit in place and return true if the operator changed
/// the value this frame.
pub trait EditorUi {
    /// Open a collapsible group. Children are drawn only if this returns true,
    /// in which case [`end_object`](Self::end_object) follows.
    fn begin_object(&mut self, field: &Field<'_>) -> bool;

    fn end_object(&mut self);

    fn checkbox(&mut self, field: &Field<'_>, value: &mut bool) -> bool;

    fn input_integer(&mut self, field: &Field<'_>, value: &mut i64) -> bool;

    fn input_number(&mut self, field: &Field<'_>, value: &mut f64) -> bool;

    /// Combo box over `variants`. Returns the newly selected index.
    fn select_variant(&mut self, field: &Field<'_>, current: &str, variants: &[String]) -> Option<usize>;

    /// Checkbox for a nullable field. Returns true if the operator toggled it.
    fn presence_toggle(&mut self, field: &Field<'_>, present: bool) -> bool;

    /// Start a `columns` x `rows` table of numeric cells, filled row by row.
    fn begin_grid(&mut self, field: &Field<'_>, columns: usize, rows: usize);

    fn end_grid(&mut self);

    /// A grid cell with no backing element.
    fn empty_cell(&mut self);

    /// Field-local problem, shown in place of or next to the field.
    fn warning(&mut self, field: &Field<'_>, message: &str);
}

//! Scripted immediate-mode UI for driving the editor in tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use gcfeeder_editor::{EditorUi, Field};

/// Records every widget call and answers from a per-path script.
///
/// Scripted answers are consumed on first use, so a second pass over the
/// same form sees an idle operator.
#[derive(Debug, Default)]
pub struct ScriptedUi {
    pub log: Vec<String>,
    pub warnings: Vec<(String, String)>,
    collapsed: HashSet<String>,
    checkbox_flips: HashSet<String>,
    integers: HashMap<String, i64>,
    numbers: HashMap<String, f64>,
    variants: HashMap<String, usize>,
    presence_flips: HashSet<String>,
}

impl ScriptedUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collapse(mut self, path: &str) -> Self {
        self.collapsed.insert(path.to_string());
        self
    }

    pub fn flip(mut self, path: &str) -> Self {
        self.checkbox_flips.insert(path.to_string());
        self
    }

    pub fn set_integer(mut self, path: &str, value: i64) -> Self {
        self.integers.insert(path.to_string(), value);
        self
    }

    pub fn set_number(mut self, path: &str, value: f64) -> Self {
        self.numbers.insert(path.to_string(), value);
        self
    }

    pub fn select(mut self, path: &str, index: usize) -> Self {
        self.variants.insert(path.to_string(), index);
        self
    }

    pub fn toggle_presence(mut self, path: &str) -> Self {
        self.presence_flips.insert(path.to_string());
        self
    }

    pub fn transcript(&self) -> String {
        self.log.join("\n")
    }
}

impl EditorUi for ScriptedUi {
    fn begin_object(&mut self, field: &Field<'_>) -> bool {
        let path = field.path.to_string();
        let open = !self.collapsed.contains(&path);
        self.log.push(format!("object {path} open={open}"));
        open
    }

    fn end_object(&mut self) {
        self.log.push("end object".to_string());
    }

    fn checkbox(&mut self, field: &Field<'_>, value: &mut bool) -> bool {
        let path = field.path.to_string();
        self.log.push(format!("bool {path}={value}"));
        if self.checkbox_flips.remove(&path) {
            *value = !*value;
            return true;
        }
        false
    }

    fn input_integer(&mut self, field: &Field<'_>, value: &mut i64) -> bool {
        let path = field.path.to_string();
        self.log.push(format!("int {path}={value}"));
        match self.integers.remove(&path) {
            Some(new) => {
                *value = new;
                true
            }
            None => false,
        }
    }

    fn input_number(&mut self, field: &Field<'_>, value: &mut f64) -> bool {
        let path = field.path.to_string();
        self.log.push(format!("num {path}={value}"));
        match self.numbers.remove(&path) {
            Some(new) => {
                *value = new;
                true
            }
            None => false,
        }
    }

    fn select_variant(&mut self, field: &Field<'_>, current: &str, variants: &[String]) -> Option<usize> {
        let path = field.path.to_string();
        self.log
            .push(format!("enum {path}={current} of [{}]", variants.join(", ")));
        self.variants.remove(&path)
    }

    fn presence_toggle(&mut self, field: &Field<'_>, present: bool) -> bool {
        let path = field.path.to_string();
        self.log.push(format!("presence {path}={present}"));
        self.presence_flips.remove(&path)
    }

    fn begin_grid(&mut self, field: &Field<'_>, columns: usize, rows: usize) {
        self.log.push(format!("grid {} {columns}x{rows}", field.path));
    }

    fn end_grid(&mut self) {
        self.log.push("end grid".to_string());
    }

    fn empty_cell(&mut self) {
        self.log.push("empty".to_string());
    }

    fn warning(&mut self, field: &Field<'_>, message: &str) {
        self.log.push(format!("warn {}", field.path));
        self.warnings
            .push((field.path.to_string(), message.to_string()));
    }
}

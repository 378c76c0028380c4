//! Structured document values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::coerce::{lossy_f64_to_i64, lossy_i64_to_f64, lossy_u64_to_i64};
use crate::path::{DocumentPath, PathSegment};

/// Ordered map used for object values.
pub type DocumentMap = IndexMap<String, DocumentValue>;

/// A structured value: object, bool, integer, float, string, array or null.
///
/// Objects keep insertion order so a document written back to disk keeps the
/// layout it was loaded with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<DocumentValue>),
    Object(DocumentMap),
}

impl DocumentValue {
    /// Short name of the value kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentValue::Null => "null",
            DocumentValue::Bool(_) => "bool",
            DocumentValue::Integer(_) => "integer",
            DocumentValue::Float(_) => "float",
            DocumentValue::String(_) => "string",
            DocumentValue::Array(_) => "array",
            DocumentValue::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DocumentValue::Null)
    }

    /// Integer view. Floats are rounded and saturated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DocumentValue::Integer(i) => Some(*i),
            DocumentValue::Float(f) => Some(lossy_f64_to_i64(*f)),
            _ => None,
        }
    }

    /// Float view. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DocumentValue::Integer(i) => Some(lossy_i64_to_f64(*i)),
            DocumentValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, DocumentValue::Integer(_) | DocumentValue::Float(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocumentValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<DocumentValue>> {
        match self {
            DocumentValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<DocumentValue>> {
        match self {
            DocumentValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&DocumentMap> {
        match self {
            DocumentValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut DocumentMap> {
        match self {
            DocumentValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up an object property.
    pub fn get(&self, key: &str) -> Option<&DocumentValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Look up an object property mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut DocumentValue> {
        self.as_object_mut().and_then(|map| map.get_mut(key))
    }

    /// Follow `path` from this value.
    pub fn pointer(&self, path: &DocumentPath) -> Option<&DocumentValue> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| match segment {
                PathSegment::Key(key) => node.get(key),
                PathSegment::Index(index) => node.as_array().and_then(|items| items.get(*index)),
            })
    }

    /// Follow `path` from this value mutably.
    pub fn pointer_mut(&mut self, path: &DocumentPath) -> Option<&mut DocumentValue> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| match segment {
                PathSegment::Key(key) => node.get_mut(key),
                PathSegment::Index(index) => node
                    .as_array_mut()
                    .and_then(|items| items.get_mut(*index)),
            })
    }
}

impl From<bool> for DocumentValue {
    fn from(value: bool) -> Self {
        DocumentValue::Bool(value)
    }
}

impl From<i64> for DocumentValue {
    fn from(value: i64) -> Self {
        DocumentValue::Integer(value)
    }
}

impl From<u8> for DocumentValue {
    fn from(value: u8) -> Self {
        DocumentValue::Integer(i64::from(value))
    }
}

impl From<&str> for DocumentValue {
    fn from(value: &str) -> Self {
        DocumentValue::String(value.to_string())
    }
}

impl<K: Into<String>> FromIterator<(K, DocumentValue)> for DocumentValue {
    fn from_iter<I: IntoIterator<Item = (K, DocumentValue)>>(iter: I) -> Self {
        DocumentValue::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<serde_json::Value> for DocumentValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DocumentValue::Null,
            serde_json::Value::Bool(b) => DocumentValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DocumentValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    DocumentValue::Integer(lossy_u64_to_i64(u))
                } else {
                    DocumentValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => DocumentValue::String(s),
            serde_json::Value::Array(items) => {
                DocumentValue::Array(items.into_iter().map(DocumentValue::from).collect())
            }
            serde_json::Value::Object(map) => DocumentValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, DocumentValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&DocumentValue> for serde_json::Value {
    fn from(value: &DocumentValue) -> Self {
        match value {
            DocumentValue::Null => serde_json::Value::Null,
            DocumentValue::Bool(b) => serde_json::Value::Bool(*b),
            DocumentValue::Integer(i) => serde_json::Value::from(*i),
            // Non-finite floats have no JSON form and become null.
            DocumentValue::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            DocumentValue::String(s) => serde_json::Value::String(s.clone()),
            DocumentValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            DocumentValue::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Result<DocumentValue, serde_json::Error> {
        serde_json::from_str(
            r#"{
                "enabled": true,
                "deadzone": 0.25,
                "mapping": "oot-vc",
                "center": [128, 127],
                "trigger_data": null
            }"#,
        )
    }

    #[test]
    fn test_deserialize_kinds() -> Result<(), serde_json::Error> {
        let doc = sample()?;
        assert_eq!(doc.get("enabled"), Some(&DocumentValue::Bool(true)));
        assert_eq!(doc.get("deadzone").map(DocumentValue::kind), Some("float"));
        assert_eq!(doc.get("mapping").and_then(DocumentValue::as_str), Some("oot-vc"));
        assert_eq!(doc.get("trigger_data"), Some(&DocumentValue::Null));
        let center = doc.get("center").and_then(DocumentValue::as_array);
        assert_eq!(center.map(Vec::len), Some(2));
        assert_eq!(
            center.and_then(|c| c.first()),
            Some(&DocumentValue::Integer(128))
        );
        Ok(())
    }

    #[test]
    fn test_object_order_is_preserved() -> Result<(), serde_json::Error> {
        let doc = sample()?;
        let keys: Vec<&str> = doc
            .as_object()
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(keys, ["enabled", "deadzone", "mapping", "center", "trigger_data"]);

        let text = serde_json::to_string(&doc)?;
        assert!(text.starts_with(r#"{"enabled":true,"deadzone":0.25"#));
        Ok(())
    }

    #[test]
    fn test_float_literal_stays_float() -> Result<(), serde_json::Error> {
        let doc: DocumentValue = serde_json::from_str("[1.0, 1]")?;
        assert_eq!(
            doc,
            DocumentValue::Array(vec![DocumentValue::Float(1.0), DocumentValue::Integer(1)])
        );
        assert_eq!(serde_json::to_string(&doc)?, "[1.0,1]");
        Ok(())
    }

    #[test]
    fn test_pointer_follows_keys_and_indices() -> Result<(), serde_json::Error> {
        let mut doc = sample()?;
        let path = DocumentPath::root().key("center").index(1);
        assert_eq!(doc.pointer(&path), Some(&DocumentValue::Integer(127)));

        if let Some(slot) = doc.pointer_mut(&path) {
            *slot = DocumentValue::Integer(130);
        }
        assert_eq!(doc.pointer(&path).and_then(DocumentValue::as_i64), Some(130));

        assert!(doc.pointer(&DocumentPath::root().key("center").index(2)).is_none());
        assert!(doc.pointer(&DocumentPath::root().key("enabled").key("x")).is_none());
        Ok(())
    }

    #[test]
    fn test_json_value_conversion_agrees_with_serde() -> Result<(), serde_json::Error> {
        let doc = sample()?;
        let value = serde_json::Value::from(&doc);
        assert_eq!(DocumentValue::from(value.clone()), doc);
        assert_eq!(serde_json::to_value(&doc)?, value);
        Ok(())
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(DocumentValue::Float(2.6).as_i64(), Some(3));
        assert_eq!(DocumentValue::Integer(4).as_f64().map(|f| f > 3.9 && f < 4.1), Some(true));
        assert_eq!(DocumentValue::from("x").as_i64(), None);
    }
}

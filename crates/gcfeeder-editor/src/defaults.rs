//! Default values for nullable fields switched from absent to present.

use std::collections::HashMap;
use std::fmt;

use gcfeeder_calibration::{SticksCalibration, TriggersCalibration};
use gcfeeder_schema::DocumentValue;

type Factory = Box<dyn Fn() -> DocumentValue + Send + Sync>;

/// Field name → default value factory.
///
/// ```
/// use gcfeeder_editor::DefaultFactories;
/// use gcfeeder_schema::DocumentValue;
///
/// let defaults = DefaultFactories::standard();
/// assert_eq!(defaults.create("inversion_mapping"), Some(DocumentValue::from("oot-vc")));
/// assert!(defaults.create("analog_scaling").is_none());
/// ```
#[derive(Default)]
pub struct DefaultFactories {
    factories: HashMap<String, Factory>,
}

impl DefaultFactories {
    /// No factories registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for the stock profile layout:
    ///
    /// - `stick_data`: ideal gate, centered, for both sticks
    /// - `trigger_data`: full 0..=255 travel for both triggers
    /// - `inversion_mapping`: `"oot-vc"`
    pub fn standard() -> Self {
        Self::new()
            .with("stick_data", || SticksCalibration::default().to_document())
            .with("trigger_data", || TriggersCalibration::default().to_document())
            .with("inversion_mapping", || DocumentValue::from("oot-vc"))
    }

    /// Register (or replace) the factory for `field`.
    #[must_use]
    pub fn with<F>(mut self, field: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> DocumentValue + Send + Sync + 'static,
    {
        self.register(field, factory);
        self
    }

    /// Register (or replace) the factory for `field`.
    pub fn register<F>(&mut self, field: impl Into<String>, factory: F)
    where
        F: Fn() -> DocumentValue + Send + Sync + 'static,
    {
        self.factories.insert(field.into(), Box::new(factory));
    }

    pub fn contains(&self, field: &str) -> bool {
        self.factories.contains_key(field)
    }

    /// A fresh default for `field`, if one is registered.
    pub fn create(&self, field: &str) -> Option<DocumentValue> {
        self.factories.get(field).map(|factory| factory())
    }
}

impl fmt::Debug for DefaultFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        fields.sort_unstable();
        f.debug_struct("DefaultFactories")
            .field("fields", &fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcfeeder_schema::DocumentPath;

    #[test]
    fn test_standard_stick_default_shape() -> Result<(), gcfeeder_errors::SchemaError> {
        let defaults = DefaultFactories::standard();
        let value = defaults.create("stick_data").unwrap_or_default();
        let center = value.pointer(&"c_stick.stick_center".parse()?);
        assert_eq!(
            center,
            Some(&DocumentValue::Array(vec![128_i64.into(), 128_i64.into()]))
        );
        let top = value.pointer(&"main_stick.notch_points[0]".parse()?);
        assert_eq!(
            top,
            Some(&DocumentValue::Array(vec![128_i64.into(), 255_i64.into()]))
        );
        Ok(())
    }

    #[test]
    fn test_standard_trigger_default() {
        let defaults = DefaultFactories::standard();
        let value = defaults.create("trigger_data").unwrap_or_default();
        let max = value.pointer(&DocumentPath::root().key("r_trigger").key("max"));
        assert_eq!(max, Some(&DocumentValue::Integer(255)));
    }

    #[test]
    fn test_register_replaces() {
        let mut defaults = DefaultFactories::standard();
        defaults.register("inversion_mapping", || DocumentValue::from("none"));
        assert_eq!(
            defaults.create("inversion_mapping"),
            Some(DocumentValue::from("none"))
        );
        assert!(defaults.contains("stick_data"));
        assert!(format!("{defaults:?}").contains("trigger_data"));
    }

    #[test]
    fn test_each_call_builds_a_fresh_value() {
        let defaults = DefaultFactories::standard();
        let mut first = defaults.create("trigger_data").unwrap_or_default();
        if let Some(min) = first.pointer_mut(&DocumentPath::root().key("l_trigger").key("min")) {
            *min = DocumentValue::Integer(9);
        }
        let second = defaults.create("trigger_data").unwrap_or_default();
        assert_ne!(first, second);
    }
}

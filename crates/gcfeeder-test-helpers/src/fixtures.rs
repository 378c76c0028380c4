//! Store schema and store document fixtures.

use gcfeeder_schema::{DocumentValue, ProfileSchema};

use crate::must::must;

/// Store schema shaped like the one published alongside gcfeeder releases.
pub const STORE_SCHEMA_JSON: &str = r##"{
    "$schema": "http://json-schema.org/draft-07/schema#",
    "title": "Config",
    "type": "object",
    "definitions": {
        "StickCalibration": {
            "type": "object",
            "properties": {
                "notch_points": {
                    "type": "array",
                    "minItems": 8,
                    "items": {
                        "type": "array",
                        "minItems": 2,
                        "items": { "type": "integer", "minimum": 0, "maximum": 255 }
                    }
                },
                "stick_center": {
                    "type": "array",
                    "minItems": 2,
                    "items": { "type": "integer", "minimum": 0, "maximum": 255 }
                }
            }
        },
        "TriggerCalibration": {
            "type": "object",
            "properties": {
                "min": { "type": "integer", "minimum": 0, "maximum": 255 },
                "max": { "type": "integer", "minimum": 0, "maximum": 255 }
            }
        }
    },
    "properties": {
        "$schema": { "type": "string" },
        "current_profile": { "type": "string" },
        "profiles": {
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "config": {
                        "type": "object",
                        "properties": {
                            "calibration": {
                                "type": "object",
                                "properties": {
                                    "enabled": { "type": "boolean" },
                                    "stick_data": {
                                        "anyOf": [
                                            {
                                                "type": "object",
                                                "properties": {
                                                    "main_stick": { "$ref": "#/definitions/StickCalibration" },
                                                    "c_stick": { "$ref": "#/definitions/StickCalibration" }
                                                }
                                            },
                                            { "type": "null" }
                                        ]
                                    },
                                    "trigger_data": {
                                        "anyOf": [
                                            {
                                                "type": "object",
                                                "properties": {
                                                    "l_trigger": { "$ref": "#/definitions/TriggerCalibration" },
                                                    "r_trigger": { "$ref": "#/definitions/TriggerCalibration" }
                                                }
                                            },
                                            { "type": "null" }
                                        ]
                                    }
                                }
                            },
                            "analog_scaling": {
                                "type": "object",
                                "properties": {
                                    "enabled": { "type": "boolean" },
                                    "stick_scale": { "type": "number", "minimum": 0.5, "maximum": 2.0 },
                                    "trigger_deadzone": { "type": "integer", "minimum": 0, "maximum": 64 }
                                }
                            },
                            "inversion_mapping": {
                                "anyOf": [
                                    { "type": "string", "enum": ["oot-vc"] },
                                    { "type": "null" }
                                ]
                            }
                        }
                    }
                }
            }
        }
    }
}"##;

/// Store document with two profiles and keys the store does not interpret.
pub const SAMPLE_STORE_JSON: &str = r##"{
    "$schema": "https://raw.githubusercontent.com/gcfeeder/gcfeeder/v2.0.0/resource/config.schema.json",
    "current_profile": "default",
    "log_level": "info",
    "profiles": [
        {
            "name": "default",
            "config": {
                "calibration": {
                    "enabled": false,
                    "stick_data": null,
                    "trigger_data": null
                },
                "analog_scaling": {
                    "enabled": true,
                    "stick_scale": 1.25,
                    "trigger_deadzone": 4
                },
                "inversion_mapping": null
            }
        },
        {
            "name": "competitive",
            "notes": "tournament setup",
            "config": {
                "calibration": {
                    "enabled": true,
                    "stick_data": null,
                    "trigger_data": {
                        "l_trigger": { "min": 30, "max": 220 },
                        "r_trigger": { "min": 28, "max": 225 }
                    }
                },
                "analog_scaling": {
                    "enabled": false,
                    "stick_scale": 1.0,
                    "trigger_deadzone": 0
                },
                "inversion_mapping": "oot-vc"
            }
        }
    ]
}"##;

/// [`STORE_SCHEMA_JSON`], parsed.
///
/// # Panics
///
/// Never for the bundled fixture.
pub fn store_schema() -> ProfileSchema {
    must(ProfileSchema::from_json_str(STORE_SCHEMA_JSON))
}

/// [`SAMPLE_STORE_JSON`] as a JSON value.
///
/// # Panics
///
/// Never for the bundled fixture.
pub fn sample_store_value() -> serde_json::Value {
    must(serde_json::from_str(SAMPLE_STORE_JSON))
}

/// [`SAMPLE_STORE_JSON`] as a document.
pub fn sample_store() -> DocumentValue {
    DocumentValue::from(sample_store_value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcfeeder_schema::SchemaNode;

    #[test]
    fn test_schema_fixture_parses() {
        let schema = store_schema();
        let path = crate::must_parse("calibration.trigger_data.r_trigger.max");
        assert!(matches!(
            schema.resolve(&path),
            Some(SchemaNode::Integer {
                min: Some(0),
                max: Some(255)
            })
        ));
    }

    #[test]
    fn test_sample_store_fixture() {
        let store = sample_store();
        assert_eq!(
            store.get("current_profile"),
            Some(&DocumentValue::from("default"))
        );
        let profiles = store.get("profiles").and_then(DocumentValue::as_array);
        assert_eq!(profiles.map(Vec::len), Some(2));
    }
}

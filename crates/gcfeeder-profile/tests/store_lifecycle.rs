//! Profile store lifecycle against memory and file storage.

use std::sync::Arc;

use gcfeeder_calibration::{
    CalibrationPoint, StickCalibrationSession, TriggerCalibrationSession, default_notch_points,
};
use gcfeeder_editor::{EditOp, EditorUi, Field, SchemaEditor};
use gcfeeder_errors::{GcfeederError, SchemaError};
use gcfeeder_inputs::ReloadFlag;
use gcfeeder_profile::{FileStorage, MemoryStorage, ProfileError, ProfileStore, ProfileStoreConfig};
use gcfeeder_schema::{DocumentPath, DocumentValue};
use gcfeeder_test_helpers::prelude::*;
use insta::assert_snapshot;
use serde_json::json;
use tempfile::TempDir;

fn memory_store(document: DocumentValue) -> Result<(ProfileStore<MemoryStorage>, MemoryStorage), ProfileError> {
    let storage = MemoryStorage::with_document(document);
    let store = ProfileStore::open(ProfileStoreConfig::default(), store_schema(), storage.clone())?;
    Ok((store, storage))
}

fn sample_memory_store() -> Result<(ProfileStore<MemoryStorage>, MemoryStorage), ProfileError> {
    memory_store(sample_store())
}

fn ab_store() -> DocumentValue {
    json!({
        "current_profile": "A",
        "profiles": [
            { "name": "A", "config": { "calibration": { "enabled": false, "stick_data": null, "trigger_data": null } } },
            { "name": "B", "config": { "calibration": { "enabled": true, "stick_data": null, "trigger_data": null } } }
        ]
    })
    .into()
}

fn path(text: &str) -> DocumentPath {
    must_parse(text)
}

#[test]
fn file_round_trip_preserves_document() -> TestResult {
    init_test_tracing();
    let dir = TempDir::new()?;
    let file = dir.path().join("config.json");
    std::fs::write(&file, SAMPLE_STORE_JSON)?;

    let mut store = ProfileStore::open_file(ProfileStoreConfig::new(&file), store_schema())?;
    store.save()?;

    let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
    assert_eq!(written, sample_store_value());
    let keys: Vec<&str> = written
        .as_object()
        .map(|o| o.keys().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(keys, ["$schema", "current_profile", "log_level", "profiles"]);
    assert_eq!(written.pointer("/profiles/1/notes"), Some(&json!("tournament setup")));
    Ok(())
}

#[test]
fn removing_current_selects_first_remaining() -> TestResult {
    let (mut store, _) = memory_store(ab_store())?;
    store.remove_profile("A")?;
    assert_eq!(store.current_profile_name(), "B");
    assert_eq!(store.profile_names().collect::<Vec<_>>(), ["B"]);

    assert_eq!(store.remove_profile("B"), Err(ProfileError::last_profile("B")));
    assert_eq!(store.profile_names().collect::<Vec<_>>(), ["B"]);
    assert_eq!(store.current_profile_name(), "B");
    Ok(())
}

#[test]
fn removing_other_profile_keeps_selection_and_buffer() -> TestResult {
    let (mut store, _) = memory_store(ab_store())?;
    let editor = SchemaEditor::standard();
    store.apply(&editor, &path("calibration.enabled"), EditOp::Toggle)?;

    store.remove_profile("B")?;
    assert_eq!(store.current_profile_name(), "A");
    assert!(store.edit_buffer().is_some_and(|b| b.is_dirty()));
    Ok(())
}

#[test]
fn add_profile_selects_and_marks_dirty() -> TestResult {
    let (mut store, storage) = sample_memory_store()?;
    assert!(!store.is_dirty());

    let config = store.current_config().cloned().ok_or("no current config")?;
    assert_eq!(
        store.add_profile("default", config.clone()),
        Err(ProfileError::duplicate_name("default"))
    );

    store.add_profile("travel", config)?;
    assert_eq!(store.current_profile_name(), "travel");
    assert!(store.is_dirty());
    assert!(!store.reload_flag().is_requested());

    store.save()?;
    assert!(!store.is_dirty());
    assert!(store.reload_flag().take());
    assert_eq!(storage.save_count(), 1);

    let saved = storage.document().ok_or("nothing saved")?;
    assert_eq!(saved.get("current_profile"), Some(&DocumentValue::from("travel")));
    Ok(())
}

#[test]
fn edits_stay_in_buffer_until_commit() -> TestResult {
    let (mut store, _) = sample_memory_store()?;
    let editor = SchemaEditor::standard();
    let deadzone = path("analog_scaling.trigger_deadzone");

    assert!(store.apply(&editor, &deadzone, EditOp::SetInteger(100))?);
    assert_eq!(
        store.current_config().and_then(|c| c.pointer(&deadzone)),
        Some(&DocumentValue::Integer(64))
    );
    let stored = store.current_profile().and_then(|p| p.config().pointer(&deadzone));
    assert_eq!(stored, Some(&DocumentValue::Integer(4)));
    assert!(store.is_dirty());

    assert!(store.commit_edits());
    assert!(store.edit_buffer().is_none());
    let profile = store.current_profile().ok_or("no current profile")?;
    assert!(profile.is_dirty());
    assert_eq!(profile.config().pointer(&deadzone), Some(&DocumentValue::Integer(64)));
    assert!(!store.commit_edits());
    Ok(())
}

#[test]
fn discard_and_select_drop_uncommitted_edits() -> TestResult {
    let (mut store, _) = sample_memory_store()?;
    let editor = SchemaEditor::standard();
    let enabled = path("analog_scaling.enabled");

    store.apply(&editor, &enabled, EditOp::Toggle)?;
    store.discard_edits();
    assert!(!store.is_dirty());
    assert_eq!(
        store.current_config().and_then(|c| c.pointer(&enabled)),
        Some(&DocumentValue::Bool(true))
    );

    store.apply(&editor, &enabled, EditOp::Toggle)?;
    store.select_profile("competitive")?;
    store.select_profile("default")?;
    assert!(!store.is_dirty());
    Ok(())
}

#[test]
fn rejected_edit_leaves_buffer_clean() -> TestResult {
    let (mut store, _) = sample_memory_store()?;
    let editor = SchemaEditor::standard();

    let err = store.apply(&editor, &path("analog_scaling.turbo"), EditOp::Toggle);
    assert!(matches!(
        err,
        Err(GcfeederError::Schema(SchemaError::InvalidEdit { .. }))
    ));
    assert!(!store.is_dirty());
    Ok(())
}

#[test]
fn duplicate_current_copies_buffered_edits() -> TestResult {
    let (mut store, _) = sample_memory_store()?;
    let editor = SchemaEditor::standard();
    let scale = path("analog_scaling.stick_scale");
    store.apply(&editor, &scale, EditOp::SetNumber(1.5))?;

    store.duplicate_current("default copy")?;
    assert_eq!(store.current_profile_name(), "default copy");
    assert_eq!(
        store.current_config().and_then(|c| c.pointer(&scale)),
        Some(&DocumentValue::Float(1.5))
    );
    let original = store.profile("default").ok_or("default missing")?;
    assert_eq!(original.config().pointer(&scale), Some(&DocumentValue::Float(1.25)));
    Ok(())
}

#[test]
fn trigger_calibration_reaches_storage_only_after_save() -> TestResult {
    let (mut store, storage) = memory_store(ab_store())?;
    let mut session = TriggerCalibrationSession::new();
    for value in [0, 255, 20, 230] {
        session.tick(value, true);
        session.tick(value, false);
    }

    session.apply(&mut store)?;
    assert!(store.is_dirty());
    assert_eq!(storage.document(), Some(ab_store()));

    assert!(store.commit_edits());
    store.save()?;
    let saved = storage.document().ok_or("nothing saved")?;
    let text = serde_json::to_string_pretty(&serde_json::Value::from(&saved))?;
    assert_snapshot!(text, @r#"
    {
      "current_profile": "A",
      "profiles": [
        {
          "name": "A",
          "config": {
            "calibration": {
              "enabled": false,
              "stick_data": null,
              "trigger_data": {
                "l_trigger": {
                  "min": 0,
                  "max": 255
                },
                "r_trigger": {
                  "min": 20,
                  "max": 230
                }
              }
            }
          }
        },
        {
          "name": "B",
          "config": {
            "calibration": {
              "enabled": true,
              "stick_data": null,
              "trigger_data": null
            }
          }
        }
      ]
    }
    "#);
    Ok(())
}

#[test]
fn rejected_trigger_calibration_is_not_written() -> TestResult {
    let (mut store, _) = memory_store(ab_store())?;
    let mut session = TriggerCalibrationSession::new();
    for value in [0, 255, 200, 50] {
        session.tick(value, true);
        session.tick(value, false);
    }

    assert!(session.apply(&mut store).is_err());
    assert!(!store.is_dirty());
    assert!(session.is_finished());
    Ok(())
}

#[test]
fn stick_calibration_writes_both_sticks() -> TestResult {
    let (mut store, _) = sample_memory_store()?;
    let mut session = StickCalibrationSession::new();
    for _ in 0..2 {
        session.tick(CalibrationPoint::new(127, 129), true);
        session.tick(CalibrationPoint::new(127, 129), false);
        for point in default_notch_points() {
            session.tick(point, true);
            session.tick(point, false);
        }
    }

    session.apply(&mut store)?;
    let config = store.current_config().ok_or("no current config")?;
    assert_eq!(
        config.pointer(&path("calibration.stick_data.c_stick.stick_center")),
        Some(&DocumentValue::from(json!([127, 129])))
    );
    assert_eq!(
        config.pointer(&path("calibration.stick_data.main_stick.notch_points[6]")),
        Some(&DocumentValue::from(json!([1, 127])))
    );
    Ok(())
}

#[test]
fn calibration_without_calibration_object_is_a_mismatch() -> TestResult {
    let document: DocumentValue = json!({
        "current_profile": "bare",
        "profiles": [{ "name": "bare", "config": {} }]
    })
    .into();
    let (mut store, _) = memory_store(document)?;
    let mut session = TriggerCalibrationSession::new();
    for value in [0, 255, 0, 255] {
        session.tick(value, true);
        session.tick(value, false);
    }

    let err = session.apply(&mut store);
    assert!(matches!(
        err,
        Err(GcfeederError::Schema(SchemaError::Mismatch { ref path, .. })) if path == "calibration"
    ));
    Ok(())
}

#[test]
fn failed_load_keeps_state() -> TestResult {
    let (mut store, storage) = sample_memory_store()?;
    let editor = SchemaEditor::standard();
    store.apply(&editor, &path("analog_scaling.enabled"), EditOp::Toggle)?;

    storage.replace(json!({ "current_profile": "x", "profiles": [] }).into());
    let err = store.load();
    assert!(matches!(err, Err(ProfileError::InvalidFormat { .. })));
    assert!(store.is_dirty());
    assert_eq!(store.profiles().len(), 2);
    assert!(!store.reload_flag().is_requested());
    Ok(())
}

#[test]
fn failed_save_keeps_dirty_flags() -> TestResult {
    let (mut store, storage) = memory_store(ab_store())?;
    store.add_profile("C", json!({ "calibration": {} }).into())?;
    storage.fail_writes(true);

    assert!(matches!(store.save(), Err(ProfileError::Io { .. })));
    assert!(store.is_dirty());
    assert!(!store.reload_flag().is_requested());
    assert_eq!(storage.document(), Some(ab_store()));
    Ok(())
}

#[test]
fn load_replaces_state_and_discards_edits() -> TestResult {
    let (mut store, storage) = sample_memory_store()?;
    let editor = SchemaEditor::standard();
    store.apply(&editor, &path("analog_scaling.enabled"), EditOp::Toggle)?;
    store.add_profile("scratch", json!({}).into())?;

    storage.replace(ab_store());
    store.load()?;

    assert!(!store.is_dirty());
    assert!(store.edit_buffer().is_none());
    assert_eq!(store.profile_names().collect::<Vec<_>>(), ["A", "B"]);
    assert_eq!(store.current_profile_name(), "A");
    assert!(store.reload_flag().take());
    Ok(())
}

#[test]
fn schema_url_is_rebuilt_on_request() -> TestResult {
    let flag = Arc::new(ReloadFlag::new());
    let config = ProfileStoreConfig::default()
        .with_schema_url("https://example.invalid/gcfeeder", "config.schema.json")
        .with_reload_flag(Arc::clone(&flag));
    let storage = MemoryStorage::with_document(sample_store());
    let mut store = ProfileStore::open(config, store_schema(), storage.clone())?;

    // A plain save writes back the loaded URL.
    store.save()?;
    assert_eq!(storage.document(), Some(sample_store()));

    assert_eq!(
        store.update_schema_url(),
        Some("https://example.invalid/gcfeeder/config.schema.json")
    );
    store.save()?;
    assert!(flag.take());

    let saved = storage.document().ok_or("nothing saved")?;
    assert_eq!(
        saved.get("$schema"),
        Some(&DocumentValue::from("https://example.invalid/gcfeeder/config.schema.json"))
    );
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() -> TestResult {
    let dir = TempDir::new()?;
    let config = ProfileStoreConfig::new(dir.path().join("missing.json"));
    let err = ProfileStore::<FileStorage>::open_file(config, store_schema());
    assert!(matches!(err, Err(ProfileError::Io { .. })));
    Ok(())
}

/// Presses every checkbox it is shown once.
struct ToggleEverything;

impl EditorUi for ToggleEverything {
    fn begin_object(&mut self, _: &Field<'_>) -> bool {
        true
    }
    fn end_object(&mut self) {}
    fn checkbox(&mut self, _: &Field<'_>, value: &mut bool) -> bool {
        *value = !*value;
        true
    }
    fn input_integer(&mut self, _: &Field<'_>, _: &mut i64) -> bool {
        false
    }
    fn input_number(&mut self, _: &Field<'_>, _: &mut f64) -> bool {
        false
    }
    fn select_variant(&mut self, _: &Field<'_>, _: &str, _: &[String]) -> Option<usize> {
        None
    }
    fn presence_toggle(&mut self, _: &Field<'_>, _: bool) -> bool {
        false
    }
    fn begin_grid(&mut self, _: &Field<'_>, _: usize, _: usize) {}
    fn end_grid(&mut self) {}
    fn empty_cell(&mut self) {}
    fn warning(&mut self, _: &Field<'_>, _: &str) {}
}

#[test]
fn edit_with_renders_current_profile_form() -> TestResult {
    let (mut store, _) = sample_memory_store()?;
    let report = store.edit_with(&SchemaEditor::standard(), &mut ToggleEverything);

    assert!(report.changed);
    assert!(report.is_clean());
    let config = store.current_config().ok_or("no current config")?;
    assert_eq!(
        config.pointer(&path("calibration.enabled")),
        Some(&DocumentValue::Bool(true))
    );
    assert_eq!(
        config.pointer(&path("analog_scaling.enabled")),
        Some(&DocumentValue::Bool(false))
    );
    assert!(store.is_dirty());
    Ok(())
}

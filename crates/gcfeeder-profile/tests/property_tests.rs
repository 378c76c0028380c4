//! Property tests for store persistence.

use std::collections::BTreeMap;

use gcfeeder_profile::{MemoryStorage, ProfileStore, ProfileStoreConfig};
use gcfeeder_schema::DocumentValue;
use gcfeeder_test_helpers::prelude::store_schema;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use serde_json::{Map, Value};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e6_f64..1.0e6).prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::from),
    ]
}

fn object(entries: BTreeMap<String, Value>) -> Value {
    Value::Object(entries.into_iter().collect())
}

fn nested() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,6}", inner, 0..4).prop_map(object),
        ]
    })
}

fn profile_entry() -> impl Strategy<Value = (Value, BTreeMap<String, Value>)> {
    (
        prop::collection::btree_map("[a-z_]{1,8}", nested(), 0..5).prop_map(object),
        prop::collection::btree_map("x_[a-z]{1,6}", leaf(), 0..3),
    )
}

/// Store documents with unknown keys at both levels and a valid selection.
fn store_document() -> impl Strategy<Value = Value> {
    (
        prop::collection::btree_map("[A-Za-z0-9 ]{1,10}", profile_entry(), 1..5),
        any::<prop::sample::Index>(),
        prop::option::of("https://[a-z]{1,8}\\.invalid/[a-z]{1,8}\\.json"),
        prop::collection::btree_map("extra_[a-z]{1,6}", nested(), 0..3),
    )
        .prop_map(|(profiles, selected, schema_url, extra)| {
            let names: Vec<String> = profiles.keys().cloned().collect();
            let current = selected.get(&names).clone();

            let mut document = Map::new();
            if let Some(url) = schema_url {
                document.insert("$schema".to_string(), Value::from(url));
            }
            document.insert("current_profile".to_string(), Value::from(current));
            document.extend(extra);

            let entries = profiles
                .into_iter()
                .map(|(name, (config, unknown))| {
                    let mut entry = Map::new();
                    entry.insert("name".to_string(), Value::from(name));
                    entry.extend(unknown);
                    entry.insert("config".to_string(), config);
                    Value::Object(entry)
                })
                .collect();
            document.insert("profiles".to_string(), Value::Array(entries));
            Value::Object(document)
        })
}

fn fail(error: impl std::fmt::Display) -> TestCaseError {
    TestCaseError::fail(error.to_string())
}

proptest! {
    #[test]
    fn prop_save_after_open_reproduces_document(document in store_document()) {
        let original = DocumentValue::from(document);
        let storage = MemoryStorage::with_document(original.clone());
        let config = ProfileStoreConfig::default()
            .with_schema_url("https://example.invalid", "config.schema.json");
        let mut store = ProfileStore::open(config, store_schema(), storage.clone()).map_err(fail)?;

        store.save().map_err(fail)?;

        prop_assert_eq!(storage.document(), Some(original));
    }

    #[test]
    fn prop_reload_then_save_reproduces_document(document in store_document()) {
        let original = DocumentValue::from(document);
        let storage = MemoryStorage::with_document(original.clone());
        let mut store = ProfileStore::open(ProfileStoreConfig::default(), store_schema(), storage.clone())
            .map_err(fail)?;

        let names: Vec<String> = store.profile_names().map(str::to_string).collect();
        if let Some(last) = names.last() {
            store.select_profile(last).map_err(fail)?;
        }
        store.load().map_err(fail)?;
        store.save().map_err(fail)?;

        prop_assert_eq!(storage.document(), Some(original));
    }
}

//! Convenience re-exports for common test utilities.

pub use crate::fixtures::{
    SAMPLE_STORE_JSON, STORE_SCHEMA_JSON, sample_store, sample_store_value, store_schema,
};
pub use crate::init_test_tracing;
pub use crate::must::{must, must_parse, must_some, must_with};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

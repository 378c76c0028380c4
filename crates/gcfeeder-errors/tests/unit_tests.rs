//! Unit tests for error classification across crates.

use gcfeeder_errors::{
    CalibrationError, ErrorCategory, ErrorSeverity, GcfeederError, ProfileError, SchemaError,
};

#[test]
fn test_schema_errors_keep_their_path() {
    let err = SchemaError::mismatch("calibration.stick_data.main_stick", "expected object");
    assert_eq!(err.path(), "calibration.stick_data.main_stick");
}

#[test]
fn test_wrapped_severity_matches_inner() {
    let inner = SchemaError::unsupported("name", "non-enum strings unsupported");
    let outer: GcfeederError = inner.clone().into();
    assert_eq!(outer.severity(), inner.severity());
    assert_eq!(outer.category(), ErrorCategory::Schema);
}

#[test]
fn test_invalid_format_is_io_category() {
    let err: GcfeederError = ProfileError::invalid_format("config.json", "missing profiles").into();
    assert_eq!(err.category(), ErrorCategory::IO);
    assert_eq!(err.severity(), ErrorSeverity::Error);
}

#[test]
fn test_question_mark_converts_into_gcfeeder_error() {
    fn inner() -> Result<(), CalibrationError> {
        Err(CalibrationError::NotComplete)
    }

    fn outer() -> Result<(), GcfeederError> {
        inner()?;
        Ok(())
    }

    assert!(matches!(
        outer(),
        Err(GcfeederError::Calibration(CalibrationError::NotComplete))
    ));
}

#[test]
fn test_profile_io_error_is_io_category() {
    let err: GcfeederError = ProfileError::io("config.json", "gone").into();
    assert_eq!(err.category(), ErrorCategory::IO);
    assert!(err.to_string().contains("gone"));
}

//! Top-level error type and classification shared by all gcfeeder crates.

use core::fmt;

use crate::{CalibrationError, ProfileError, SchemaError};

/// Top-level error type wrapping every gcfeeder sub-error.
#[derive(Debug, thiserror::Error)]
pub enum GcfeederError {
    /// Schema/document shape errors
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Calibration capture errors
    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    /// Profile store errors
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),
}

impl GcfeederError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            GcfeederError::Schema(_) => ErrorCategory::Schema,
            GcfeederError::Calibration(_) => ErrorCategory::Calibration,
            GcfeederError::Profile(e) if e.is_storage_error() => ErrorCategory::IO,
            GcfeederError::Profile(_) => ErrorCategory::Profile,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GcfeederError::Schema(e) => e.severity(),
            GcfeederError::Calibration(e) => e.severity(),
            GcfeederError::Profile(e) => e.severity(),
        }
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Schema and document shape errors
    Schema = 0,
    /// Calibration capture errors
    Calibration = 1,
    /// Profile store invariant violations
    Profile = 2,
    /// Persistence errors
    IO = 3,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Schema => write!(f, "Schema"),
            ErrorCategory::Calibration => write!(f, "Calibration"),
            ErrorCategory::Profile => write!(f, "Profile"),
            ErrorCategory::IO => write!(f, "IO"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Warning, the affected field is skipped but everything else works
    Warning = 0,
    /// Error, the operation failed and was not applied
    Error = 1,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Schema.to_string(), "Schema");
        assert_eq!(ErrorCategory::Calibration.to_string(), "Calibration");
        assert_eq!(ErrorCategory::IO.to_string(), "IO");
    }

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Error > ErrorSeverity::Warning);
        assert_eq!(ErrorSeverity::Warning.to_string(), "WARN");
    }

    #[test]
    fn test_gcfeeder_error_category() {
        let err: GcfeederError = ProfileError::not_found("default").into();
        assert_eq!(err.category(), ErrorCategory::Profile);

        let err: GcfeederError = ProfileError::io("config.json", "disk full").into();
        assert_eq!(err.category(), ErrorCategory::IO);

        let err: GcfeederError = CalibrationError::NotComplete.into();
        assert_eq!(err.category(), ErrorCategory::Calibration);
    }

    #[test]
    fn test_wrapped_severity_follows_inner() {
        let err: GcfeederError = SchemaError::unsupported("name", "non-enum strings unsupported").into();
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err: GcfeederError = CalibrationError::invalid_trigger("l_trigger", 200, 50).into();
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_gcfeeder_error_is_std_error() {
        let err: GcfeederError = CalibrationError::NotComplete.into();
        let _: &dyn std::error::Error = &err;
    }
}

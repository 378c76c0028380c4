//! Calibration capture errors.

use crate::common::ErrorSeverity;

/// Errors produced when a capture session's result is requested or applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalibrationError {
    /// A trigger's captured release value is not below its full-press value
    #[error("Invalid calibration for {trigger}: min {min} must be below max {max}")]
    InvalidCalibration {
        /// Trigger name (`l_trigger` or `r_trigger`)
        trigger: String,
        /// Captured release value
        min: u8,
        /// Captured full-press value
        max: u8,
    },

    /// The session has not walked through every step yet
    #[error("Calibration is not complete")]
    NotComplete,
}

impl CalibrationError {
    /// Create an invalid trigger calibration error.
    pub fn invalid_trigger(trigger: impl Into<String>, min: u8, max: u8) -> Self {
        CalibrationError::InvalidCalibration {
            trigger: trigger.into(),
            min,
            max,
        }
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CalibrationError::InvalidCalibration { .. } => ErrorSeverity::Error,
            CalibrationError::NotComplete => ErrorSeverity::Warning,
        }
    }
}

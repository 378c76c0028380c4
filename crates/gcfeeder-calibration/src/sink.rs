//! Destination for finished calibration results.

use gcfeeder_errors::GcfeederError;

use crate::types::{StickCalibration, TriggerCalibration};

/// Receives finished calibration results, typically the profile store.
///
/// Implementations write into an edit buffer and mark it dirty. Nothing is
/// persisted until the host commits and saves.
pub trait CalibrationSink {
    /// Store calibration for both sticks.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot hold stick calibration.
    fn apply_stick_calibration(
        &mut self,
        main_stick: StickCalibration,
        c_stick: StickCalibration,
    ) -> Result<(), GcfeederError>;

    /// Store calibration for both triggers.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot hold trigger calibration.
    fn apply_trigger_calibration(
        &mut self,
        l_trigger: TriggerCalibration,
        r_trigger: TriggerCalibration,
    ) -> Result<(), GcfeederError>;
}

//! Controller calibration capture
//!
//! Walks the operator through a fixed sequence of gestures and turns the
//! captured raw readings into calibration data for the active profile.
//!
//! - [`StickCalibrationSession`]: center, then the 8 notches clockwise from
//!   the top, for the main stick and then the C-stick.
//! - [`TriggerCalibrationSession`]: fully released, then fully pressed, for
//!   the left and then the right trigger.
//!
//! Every step advances only on the rising edge of the confirm button, see
//! [`EdgeDetector`]. Finished results are handed to a [`CalibrationSink`].

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod edge;
pub mod sink;
pub mod stick;
pub mod trigger;
pub mod types;

pub use edge::EdgeDetector;
pub use sink::CalibrationSink;
pub use stick::{CapturedStick, Stick, StickCalibrationSession, StickStep};
pub use trigger::{Trigger, TriggerCalibrationSession, TriggerStep};
pub use types::*;

pub use gcfeeder_errors::CalibrationError;

/// Result of reading a session's outcome.
pub type CalibrationResult<T> = Result<T, CalibrationError>;

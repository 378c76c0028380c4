//! Calibration type definitions
//!
//! Serialized shapes match the persisted profile layout:
//!
//! ```text
//! StickCal: { notch_points: [[u8, u8] x 8], stick_center: [u8, u8] }
//! TrigCal:  { min: u8, max: u8 }
//! ```

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use gcfeeder_errors::SchemaError;
use gcfeeder_schema::coerce::lossy_f64_to_u8;
use gcfeeder_schema::{DocumentPath, DocumentValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{CalibrationError, CalibrationResult};

/// Number of notches on a stick gate.
pub const NOTCHES: usize = 8;

/// Notch names in capture order, clockwise from the top.
pub const NOTCH_LABELS: [&str; NOTCHES] = [
    "top",
    "top-right",
    "right",
    "bottom-right",
    "bottom",
    "bottom-left",
    "left",
    "top-left",
];

/// Resting position of an uncalibrated stick on each axis.
pub const STICK_CENTER: u8 = 128;

/// Distance from center to a notch on an ideal gate.
pub const STICK_RADIUS: u8 = 127;

/// Raw stick position.
///
/// Persisted as a two-element array `[x, y]`.
///
/// ```
/// use gcfeeder_calibration::CalibrationPoint;
///
/// let point = CalibrationPoint::new(128, 255);
/// assert_eq!(serde_json::to_string(&point)?, "[128,255]");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 2]", into = "[u8; 2]")]
pub struct CalibrationPoint {
    /// Horizontal axis, 0 is full left.
    pub x: u8,
    /// Vertical axis, 0 is full down.
    pub y: u8,
}

impl CalibrationPoint {
    /// Creates a point from its coordinates.
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// The default stick center.
    pub const fn center() -> Self {
        Self::new(STICK_CENTER, STICK_CENTER)
    }

    pub fn to_document(self) -> DocumentValue {
        DocumentValue::Array(vec![self.x.into(), self.y.into()])
    }
}

impl From<[u8; 2]> for CalibrationPoint {
    fn from([x, y]: [u8; 2]) -> Self {
        Self { x, y }
    }
}

impl From<CalibrationPoint> for [u8; 2] {
    fn from(point: CalibrationPoint) -> Self {
        [point.x, point.y]
    }
}

/// Notch positions of an ideal gate: radius 127 around (128, 128), starting at
/// the top and going clockwise. Coordinates are truncated toward zero.
///
/// ```
/// use gcfeeder_calibration::{default_notch_points, CalibrationPoint};
///
/// let points = default_notch_points();
/// assert_eq!(points[0], CalibrationPoint::new(128, 255));
/// assert_eq!(points[2], CalibrationPoint::new(255, 128));
/// assert_eq!(points[1], CalibrationPoint::new(217, 217));
/// assert_eq!(points[6], CalibrationPoint::new(1, 127));
/// ```
pub fn default_notch_points() -> [CalibrationPoint; NOTCHES] {
    let center = f64::from(STICK_CENTER);
    let radius = f64::from(STICK_RADIUS);
    let mut points = [CalibrationPoint::center(); NOTCHES];
    let mut angle = FRAC_PI_2;
    for point in &mut points {
        *point = CalibrationPoint::new(
            lossy_f64_to_u8(radius * angle.cos() + center),
            lossy_f64_to_u8(radius * angle.sin() + center),
        );
        angle -= FRAC_PI_4;
    }
    points
}

/// Notch and center calibration of one stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickCalibration {
    /// Captured notch positions in [`NOTCH_LABELS`] order.
    pub notch_points: [CalibrationPoint; NOTCHES],
    /// Captured resting position.
    pub stick_center: CalibrationPoint,
}

impl Default for StickCalibration {
    fn default() -> Self {
        Self {
            notch_points: default_notch_points(),
            stick_center: CalibrationPoint::center(),
        }
    }
}

impl StickCalibration {
    pub fn to_document(&self) -> DocumentValue {
        [
            (
                "notch_points",
                DocumentValue::Array(
                    self.notch_points
                        .iter()
                        .map(|p| p.to_document())
                        .collect(),
                ),
            ),
            ("stick_center", self.stick_center.to_document()),
        ]
        .into_iter()
        .collect()
    }

    /// Read a stick calibration out of a profile document.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Mismatch`] at `path` if the value does not have the
    /// persisted stick shape.
    pub fn from_document(value: &DocumentValue, path: &DocumentPath) -> Result<Self, SchemaError> {
        decode(value, path)
    }
}

/// Calibration of both sticks, persisted as `stick_data`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SticksCalibration {
    pub main_stick: StickCalibration,
    pub c_stick: StickCalibration,
}

impl SticksCalibration {
    pub fn to_document(&self) -> DocumentValue {
        [
            ("main_stick", self.main_stick.to_document()),
            ("c_stick", self.c_stick.to_document()),
        ]
        .into_iter()
        .collect()
    }

    /// Read `stick_data` out of a profile document.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Mismatch`] at `path` on shape mismatch.
    pub fn from_document(value: &DocumentValue, path: &DocumentPath) -> Result<Self, SchemaError> {
        decode(value, path)
    }
}

/// Released/pressed range of one analog trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerCalibration {
    /// Fully released reading.
    pub min: u8,
    /// Fully pressed reading.
    pub max: u8,
}

impl Default for TriggerCalibration {
    fn default() -> Self {
        Self { min: 0, max: 255 }
    }
}

impl TriggerCalibration {
    /// Creates a trigger calibration. Call [`validate`](Self::validate) before use.
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Check that the range is non-empty.
    ///
    /// # Errors
    ///
    /// [`CalibrationError::InvalidCalibration`] when `min >= max`.
    pub fn validate(&self, trigger: &str) -> CalibrationResult<()> {
        if self.min < self.max {
            Ok(())
        } else {
            Err(CalibrationError::invalid_trigger(trigger, self.min, self.max))
        }
    }

    pub fn to_document(&self) -> DocumentValue {
        [("min", DocumentValue::from(self.min)), ("max", DocumentValue::from(self.max))]
            .into_iter()
            .collect()
    }
}

/// Calibration of both triggers, persisted as `trigger_data`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggersCalibration {
    pub l_trigger: TriggerCalibration,
    pub r_trigger: TriggerCalibration,
}

impl TriggersCalibration {
    /// Validate both triggers, left first.
    ///
    /// # Errors
    ///
    /// The first [`CalibrationError::InvalidCalibration`] found.
    pub fn validate(&self) -> CalibrationResult<()> {
        self.l_trigger.validate("l_trigger")?;
        self.r_trigger.validate("r_trigger")
    }

    pub fn to_document(&self) -> DocumentValue {
        [
            ("l_trigger", self.l_trigger.to_document()),
            ("r_trigger", self.r_trigger.to_document()),
        ]
        .into_iter()
        .collect()
    }

    /// Read `trigger_data` out of a profile document.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Mismatch`] at `path` on shape mismatch.
    pub fn from_document(value: &DocumentValue, path: &DocumentPath) -> Result<Self, SchemaError> {
        decode(value, path)
    }
}

fn decode<T: DeserializeOwned>(value: &DocumentValue, path: &DocumentPath) -> Result<T, SchemaError> {
    serde_json::from_value(serde_json::Value::from(value))
        .map_err(|e| SchemaError::mismatch(path.to_string(), e.to_string()))
}

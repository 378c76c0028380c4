//! Signal stage readings for one controller.

use serde::{Deserialize, Serialize};

/// One transform step applied by the feeder to a control's reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SignalStage {
    /// Straight from the adapter
    Raw = 0b0001,
    /// After button/axis remapping
    Mapped = 0b0010,
    /// After notch calibration
    Calibrated = 0b0100,
    /// After analog scaling
    Scaled = 0b1000,
}

/// Set of stages the feeder currently publishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageSet(u8);

impl StageSet {
    /// Whether `stage` is in the set.
    pub fn contains(self, stage: SignalStage) -> bool {
        self.0 & stage as u8 != 0
    }

    /// Add `stage`.
    pub fn insert(&mut self, stage: SignalStage) {
        self.0 |= stage as u8;
    }
}

/// Stage readings of one stick as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickStages {
    /// Raw reading
    pub raw: [u8; 2],
    /// Mapped reading
    pub mapped: [u8; 2],
    /// Calibrated reading
    pub calibrated: [u8; 2],
    /// Scaled reading
    pub scaled: [u8; 2],
}

impl Default for StickStages {
    fn default() -> Self {
        let centered = [128, 128];
        Self {
            raw: centered,
            mapped: centered,
            calibrated: centered,
            scaled: centered,
        }
    }
}

/// Stage readings of one analog trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerStages {
    /// Raw reading
    pub raw: u8,
    /// Mapped reading
    pub mapped: u8,
    /// Calibrated reading
    pub calibrated: u8,
    /// Scaled reading
    pub scaled: u8,
}

/// Snapshot of every control the calibration UI looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputs {
    /// Main (grey) stick
    pub main_stick: StickStages,
    /// C-stick
    pub c_stick: StickStages,
    /// Left trigger
    pub l_trigger: TriggerStages,
    /// Right trigger
    pub r_trigger: TriggerStages,
    /// Level of the confirm (A) button
    pub confirm_pressed: bool,
    /// Stages the feeder currently publishes
    pub active_stages: StageSet,
}

impl RawInputs {
    /// Whether raw readings are being published, which calibration needs.
    pub fn raw_available(&self) -> bool {
        self.active_stages.contains(SignalStage::Raw)
    }
}

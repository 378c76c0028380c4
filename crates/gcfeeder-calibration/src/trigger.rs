//! Trigger range calibration session

use core::fmt;

use gcfeeder_errors::GcfeederError;
use gcfeeder_inputs::RawInputs;
use tracing::{debug, info, warn};

use crate::edge::EdgeDetector;
use crate::sink::CalibrationSink;
use crate::types::{TriggerCalibration, TriggersCalibration};
use crate::{CalibrationError, CalibrationResult};

/// Which trigger is being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Left,
    Right,
}

impl Trigger {
    /// Key used in persisted calibration.
    pub fn key(self) -> &'static str {
        match self {
            Trigger::Left => "l_trigger",
            Trigger::Right => "r_trigger",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Left => write!(f, "left trigger"),
            Trigger::Right => write!(f, "right trigger"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerStep {
    /// Waiting for the fully released reading.
    AwaitingRelease(Trigger),
    /// Waiting for the fully pressed reading.
    AwaitingFullPress(Trigger),
    Finished,
}

#[derive(Debug, Clone, Copy, Default)]
struct TriggerCapture {
    min: Option<u8>,
    max: Option<u8>,
}

impl TriggerCapture {
    fn finish(self) -> Option<TriggerCalibration> {
        Some(TriggerCalibration::new(self.min?, self.max?))
    }
}

/// Captures the released and fully pressed readings of the left trigger,
/// then the right trigger.
///
/// ```
/// use gcfeeder_calibration::{CalibrationError, TriggerCalibrationSession};
///
/// let mut session = TriggerCalibrationSession::new();
/// for (value, _) in [(0, "l min"), (255, "l max"), (200, "r min"), (50, "r max")] {
///     session.tick(value, true);
///     session.tick(value, false);
/// }
/// assert!(session.is_finished());
/// assert!(matches!(
///     session.result(),
///     Err(CalibrationError::InvalidCalibration { min: 200, max: 50, .. })
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct TriggerCalibrationSession {
    step: TriggerStep,
    confirm: EdgeDetector,
    l_trigger: TriggerCapture,
    r_trigger: TriggerCapture,
}

impl Default for TriggerCalibrationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerCalibrationSession {
    pub fn new() -> Self {
        Self {
            step: TriggerStep::AwaitingRelease(Trigger::Left),
            confirm: EdgeDetector::new(),
            l_trigger: TriggerCapture::default(),
            r_trigger: TriggerCapture::default(),
        }
    }

    pub fn step(&self) -> TriggerStep {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.step == TriggerStep::Finished
    }

    /// The trigger the operator should be working, if any.
    pub fn active_trigger(&self) -> Option<Trigger> {
        match self.step {
            TriggerStep::AwaitingRelease(t) | TriggerStep::AwaitingFullPress(t) => Some(t),
            TriggerStep::Finished => None,
        }
    }

    /// Feed one sample. Returns true if the sample was recorded.
    pub fn tick(&mut self, sample: u8, confirm: bool) -> bool {
        if !self.confirm.rising(confirm) {
            return false;
        }

        match self.step {
            TriggerStep::AwaitingRelease(trigger) => {
                self.capture_mut(trigger).min = Some(sample);
                debug!(trigger = trigger.key(), min = sample, "captured trigger release");
                self.step = TriggerStep::AwaitingFullPress(trigger);
                true
            }
            TriggerStep::AwaitingFullPress(trigger) => {
                self.capture_mut(trigger).max = Some(sample);
                debug!(trigger = trigger.key(), max = sample, "captured trigger full press");
                self.step = match trigger {
                    Trigger::Left => TriggerStep::AwaitingRelease(Trigger::Right),
                    Trigger::Right => {
                        info!("trigger calibration captured");
                        TriggerStep::Finished
                    }
                };
                true
            }
            TriggerStep::Finished => false,
        }
    }

    /// Feed the active trigger's raw reading from a snapshot.
    ///
    /// While the raw stage is not published nothing is recorded, but the
    /// confirm level still updates the edge detector.
    pub fn tick_inputs(&mut self, inputs: &RawInputs) -> bool {
        let trigger = match self.active_trigger() {
            Some(trigger) if inputs.raw_available() => trigger,
            _ => {
                self.confirm.rising(inputs.confirm_pressed);
                return false;
            }
        };
        let raw = match trigger {
            Trigger::Left => inputs.l_trigger.raw,
            Trigger::Right => inputs.r_trigger.raw,
        };
        self.tick(raw, inputs.confirm_pressed)
    }

    /// Operator instruction for the current step.
    pub fn prompt(&self) -> String {
        match self.step {
            TriggerStep::AwaitingRelease(trigger) => {
                format!("Fully release {trigger} and press A")
            }
            TriggerStep::AwaitingFullPress(trigger) => {
                format!("Fully press {trigger} and press A")
            }
            TriggerStep::Finished => "Calibration finished".to_string(),
        }
    }

    /// Captured `(min, max)` so far for `trigger`.
    pub fn captured(&self, trigger: Trigger) -> (Option<u8>, Option<u8>) {
        let capture = match trigger {
            Trigger::Left => self.l_trigger,
            Trigger::Right => self.r_trigger,
        };
        (capture.min, capture.max)
    }

    /// Discard everything captured and start over from the left trigger.
    pub fn cancel(&mut self) {
        self.l_trigger = TriggerCapture::default();
        self.r_trigger = TriggerCapture::default();
        self.step = TriggerStep::AwaitingRelease(Trigger::Left);
        debug!("trigger calibration cancelled");
    }

    /// The captured calibration, validated.
    ///
    /// # Errors
    ///
    /// [`CalibrationError::NotComplete`] until both triggers are captured,
    /// [`CalibrationError::InvalidCalibration`] if either has `min >= max`.
    pub fn result(&self) -> CalibrationResult<TriggersCalibration> {
        if !self.is_finished() {
            return Err(CalibrationError::NotComplete);
        }
        let (Some(l_trigger), Some(r_trigger)) = (self.l_trigger.finish(), self.r_trigger.finish())
        else {
            return Err(CalibrationError::NotComplete);
        };
        let triggers = TriggersCalibration {
            l_trigger,
            r_trigger,
        };
        triggers.validate()?;
        Ok(triggers)
    }

    /// Hand the validated result to `sink` and reset the session.
    ///
    /// # Errors
    ///
    /// Any error from [`result`](Self::result) or from `sink`. The session is
    /// left untouched on error so the operator can see what was captured.
    pub fn apply<S: CalibrationSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), GcfeederError> {
        let result = self.result().inspect_err(|e| {
            warn!(error = %e, "trigger calibration rejected");
        })?;
        sink.apply_trigger_calibration(result.l_trigger, result.r_trigger)?;
        info!("trigger calibration applied");
        self.cancel();
        Ok(())
    }

    fn capture_mut(&mut self, trigger: Trigger) -> &mut TriggerCapture {
        match trigger {
            Trigger::Left => &mut self.l_trigger,
            Trigger::Right => &mut self.r_trigger,
        }
    }
}

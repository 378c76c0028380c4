//! Stick notch calibration session

use core::fmt;

use gcfeeder_errors::GcfeederError;
use gcfeeder_inputs::RawInputs;
use tracing::{debug, info};

use crate::edge::EdgeDetector;
use crate::sink::CalibrationSink;
use crate::types::{
    CalibrationPoint, NOTCH_LABELS, NOTCHES, StickCalibration, SticksCalibration,
};
use crate::{CalibrationError, CalibrationResult};

/// Which stick is being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stick {
    Main,
    C,
}

impl Stick {
    /// Prefix used in operator prompts, joined directly with "stick".
    fn prompt_name(self) -> &'static str {
        match self {
            Stick::Main => "main ",
            Stick::C => "C-",
        }
    }
}

impl fmt::Display for Stick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}stick", self.prompt_name())
    }
}

/// Where a session is in the capture sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickStep {
    /// Waiting for the resting position of `stick`.
    AwaitingCenter(Stick),
    /// Waiting for notch `index` of `stick`.
    AwaitingNotch(Stick, usize),
    /// Both sticks captured.
    Finished,
}

/// Points captured so far for one stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedStick<'a> {
    pub center: Option<CalibrationPoint>,
    pub notches: &'a [CalibrationPoint],
}

#[derive(Debug, Clone, Default)]
struct StickCapture {
    center: Option<CalibrationPoint>,
    notches: Vec<CalibrationPoint>,
}

impl StickCapture {
    fn clear(&mut self) {
        self.center = None;
        self.notches.clear();
    }

    fn finish(&self) -> Option<StickCalibration> {
        let stick_center = self.center?;
        let notch_points: [CalibrationPoint; NOTCHES] = self.notches.as_slice().try_into().ok()?;
        Some(StickCalibration {
            notch_points,
            stick_center,
        })
    }
}

/// Captures center and notch positions of the main stick, then the C-stick.
///
/// Each [`tick`](Self::tick) takes one raw sample and the confirm level; a
/// step is recorded only on the confirm's rising edge.
///
/// ```
/// use gcfeeder_calibration::{CalibrationPoint, Stick, StickCalibrationSession, StickStep};
///
/// let mut session = StickCalibrationSession::new();
/// assert_eq!(session.prompt(), "Center main stick and press A");
///
/// session.tick(CalibrationPoint::new(128, 128), true);
/// assert_eq!(session.step(), StickStep::AwaitingNotch(Stick::Main, 0));
///
/// // Holding the button does not advance again.
/// session.tick(CalibrationPoint::new(128, 255), true);
/// assert_eq!(session.step(), StickStep::AwaitingNotch(Stick::Main, 0));
/// assert_eq!(session.prompt(), "Move main stick to center then to top then press A");
/// ```
#[derive(Debug, Clone)]
pub struct StickCalibrationSession {
    step: StickStep,
    confirm: EdgeDetector,
    main_stick: StickCapture,
    c_stick: StickCapture,
}

impl Default for StickCalibrationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl StickCalibrationSession {
    pub fn new() -> Self {
        Self {
            step: StickStep::AwaitingCenter(Stick::Main),
            confirm: EdgeDetector::new(),
            main_stick: StickCapture::default(),
            c_stick: StickCapture::default(),
        }
    }

    pub fn step(&self) -> StickStep {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.step == StickStep::Finished
    }

    /// The stick the operator should be moving, if any.
    pub fn active_stick(&self) -> Option<Stick> {
        match self.step {
            StickStep::AwaitingCenter(stick) | StickStep::AwaitingNotch(stick, _) => Some(stick),
            StickStep::Finished => None,
        }
    }

    /// Feed one sample. Returns true if the sample was recorded.
    pub fn tick(&mut self, sample: CalibrationPoint, confirm: bool) -> bool {
        if !self.confirm.rising(confirm) {
            return false;
        }

        match self.step {
            StickStep::AwaitingCenter(stick) => {
                self.capture_mut(stick).center = Some(sample);
                debug!(stick = %stick, x = sample.x, y = sample.y, "captured stick center");
                self.step = StickStep::AwaitingNotch(stick, 0);
                true
            }
            StickStep::AwaitingNotch(stick, index) => {
                self.capture_mut(stick).notches.push(sample);
                debug!(
                    stick = %stick,
                    notch = NOTCH_LABELS.get(index).copied().unwrap_or("?"),
                    x = sample.x,
                    y = sample.y,
                    "captured notch"
                );
                let next = index.saturating_add(1);
                self.step = match (next < NOTCHES, stick) {
                    (true, _) => StickStep::AwaitingNotch(stick, next),
                    (false, Stick::Main) => StickStep::AwaitingCenter(Stick::C),
                    (false, Stick::C) => {
                        info!("stick calibration captured");
                        StickStep::Finished
                    }
                };
                true
            }
            StickStep::Finished => false,
        }
    }

    /// Feed the active stick's raw reading from a snapshot.
    ///
    /// While the raw stage is not published nothing is recorded, but the
    /// confirm level still updates the edge detector.
    pub fn tick_inputs(&mut self, inputs: &RawInputs) -> bool {
        let stick = match self.active_stick() {
            Some(stick) if inputs.raw_available() => stick,
            _ => {
                self.confirm.rising(inputs.confirm_pressed);
                return false;
            }
        };
        let raw = match stick {
            Stick::Main => inputs.main_stick.raw,
            Stick::C => inputs.c_stick.raw,
        };
        self.tick(CalibrationPoint::from(raw), inputs.confirm_pressed)
    }

    /// Operator instruction for the current step.
    pub fn prompt(&self) -> String {
        match self.step {
            StickStep::AwaitingCenter(stick) => format!("Center {stick} and press A"),
            StickStep::AwaitingNotch(stick, index) => format!(
                "Move {stick} to center then to {} then press A",
                NOTCH_LABELS.get(index).copied().unwrap_or("?")
            ),
            StickStep::Finished => "Calibration finished".to_string(),
        }
    }

    /// Points captured so far, for preview overlays.
    pub fn captured_points(&self, stick: Stick) -> CapturedStick<'_> {
        let capture = match stick {
            Stick::Main => &self.main_stick,
            Stick::C => &self.c_stick,
        };
        CapturedStick {
            center: capture.center,
            notches: &capture.notches,
        }
    }

    /// Discard everything captured and start over from the main stick center.
    pub fn cancel(&mut self) {
        self.main_stick.clear();
        self.c_stick.clear();
        self.step = StickStep::AwaitingCenter(Stick::Main);
        debug!("stick calibration cancelled");
    }

    /// The captured calibration.
    ///
    /// # Errors
    ///
    /// [`CalibrationError::NotComplete`] until both sticks are captured.
    pub fn result(&self) -> CalibrationResult<SticksCalibration> {
        if !self.is_finished() {
            return Err(CalibrationError::NotComplete);
        }
        match (self.main_stick.finish(), self.c_stick.finish()) {
            (Some(main_stick), Some(c_stick)) => Ok(SticksCalibration {
                main_stick,
                c_stick,
            }),
            _ => Err(CalibrationError::NotComplete),
        }
    }

    /// Hand the result to `sink` and reset the session.
    ///
    /// # Errors
    ///
    /// [`CalibrationError::NotComplete`] before the session is finished, or
    /// whatever `sink` reports. The session is left untouched on error.
    pub fn apply<S: CalibrationSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), GcfeederError> {
        let result = self.result()?;
        sink.apply_stick_calibration(result.main_stick, result.c_stick)?;
        info!("stick calibration applied");
        self.cancel();
        Ok(())
    }

    fn capture_mut(&mut self, stick: Stick) -> &mut StickCapture {
        match stick {
            Stick::Main => &mut self.main_stick,
            Stick::C => &mut self.c_stick,
        }
    }
}

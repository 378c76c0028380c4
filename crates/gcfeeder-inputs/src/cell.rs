//! Latest-snapshot cell shared between the sampler and the foreground loop.

use parking_lot::Mutex;
use tracing::trace;

use crate::stages::RawInputs;

/// Anything that can hand out the current input snapshot.
pub trait InputsSource {
    /// Copy of the most recent readings.
    fn raw_inputs(&self) -> RawInputs;
}

/// Mutex-protected latest [`RawInputs`].
///
/// Writers replace the snapshot wholesale; readers get a copy. The lock is
/// only held for the duration of the copy.
#[derive(Debug, Default)]
pub struct InputsCell {
    latest: Mutex<RawInputs>,
}

impl InputsCell {
    /// Cell holding the default (centered, no stages) snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored snapshot.
    pub fn publish(&self, inputs: RawInputs) {
        *self.latest.lock() = inputs;
        trace!(
            confirm = inputs.confirm_pressed,
            main_x = inputs.main_stick.raw[0],
            main_y = inputs.main_stick.raw[1],
            "inputs published"
        );
    }

    /// Copy of the stored snapshot.
    pub fn snapshot(&self) -> RawInputs {
        *self.latest.lock()
    }
}

impl InputsSource for InputsCell {
    fn raw_inputs(&self) -> RawInputs {
        self.snapshot()
    }
}

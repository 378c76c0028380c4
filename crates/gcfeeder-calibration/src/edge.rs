//! Confirm-button edge detection.

/// Recognises the false→true transition of a sampled button level.
///
/// ```
/// use gcfeeder_calibration::EdgeDetector;
///
/// let mut a = EdgeDetector::new();
/// assert!(a.rising(true));
/// assert!(!a.rising(true));
/// assert!(!a.rising(false));
/// assert!(a.rising(true));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    previous: bool,
}

impl EdgeDetector {
    /// A detector that treats the button as released before the first sample.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current level; true only on a rising edge.
    pub fn rising(&mut self, level: bool) -> bool {
        let edge = level && !self.previous;
        self.previous = level;
        edge
    }

    /// Level seen on the previous sample.
    pub fn previous(&self) -> bool {
        self.previous
    }
}

//! Cross-thread "configuration changed" signal.

use std::sync::atomic::{AtomicBool, Ordering};

/// Set by the profile store after save/load, consumed by the feeder.
///
/// A release store pairs with the acquire load in [`take`](Self::take) so
/// that everything written before [`request`](Self::request) is visible to
/// the thread that observes the flag.
#[derive(Debug, Default)]
pub struct ReloadFlag {
    requested: AtomicBool,
}

impl ReloadFlag {
    /// A lowered flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Whether the flag is raised, without consuming it.
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Lower the flag, returning whether it was raised.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}

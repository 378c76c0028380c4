//! # gcfeeder-inputs
//!
//! Live controller readings shared between the sampling thread and the
//! foreground loop.
//!
//! ## Concurrency model
//!
//! - [`InputsCell`] holds the latest [`RawInputs`] behind a `parking_lot`
//!   mutex. Writers replace the whole snapshot, readers copy it out and
//!   release the lock immediately. No lock is ever held across an edit.
//! - [`ReloadFlag`] is a single atomic boolean with release/acquire ordering,
//!   raised by the profile store after save/load and polled by the feeder
//!   once per iteration.
//!
//! ```rust
//! use std::sync::Arc;
//! use gcfeeder_inputs::{InputsCell, InputsSource, RawInputs, ReloadFlag, SignalStage};
//!
//! let cell = Arc::new(InputsCell::new());
//! let mut inputs = RawInputs::default();
//! inputs.main_stick.raw = [200, 128];
//! inputs.active_stages.insert(SignalStage::Raw);
//! cell.publish(inputs);
//!
//! assert_eq!(cell.raw_inputs().main_stick.raw, [200, 128]);
//!
//! let reload = ReloadFlag::new();
//! reload.request();
//! assert!(reload.take());
//! assert!(!reload.take());
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cell;
pub mod reload;
pub mod stages;

pub use cell::{InputsCell, InputsSource};
pub use reload::ReloadFlag;
pub use stages::{RawInputs, SignalStage, StageSet, StickStages, TriggerStages};

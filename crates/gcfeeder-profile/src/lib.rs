//! Named profile store for gcfeeder
//!
//! The store document holds every profile, the current selection and a
//! `$schema` reference:
//!
//! ```json
//! {
//!   "$schema": "https://.../config.schema.json",
//!   "current_profile": "default",
//!   "profiles": [{ "name": "default", "config": { ... } }]
//! }
//! ```
//!
//! [`ProfileStore`] keeps the current profile valid through every
//! operation, edits through an explicit [`EditBuffer`], and writes through a
//! [`DocumentStorage`] ([`FileStorage`] or [`MemoryStorage`]). Keys it does
//! not know are carried through load and save untouched.
//!
//! Finished calibration sessions land in the edit buffer through the
//! [`CalibrationSink`](gcfeeder_calibration::CalibrationSink) impl.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod storage;
pub mod store;

pub use config::ProfileStoreConfig;
pub use storage::{DocumentStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{EditBuffer, Profile, ProfileStore};

pub use gcfeeder_errors::ProfileError;

//! Centralized error types for the gcfeeder configuration core
//!
//! Every fallible operation in the workspace reports one of the errors defined
//! here. They are grouped by concern:
//!
//! - [`schema`]: document/schema shape problems found while editing
//! - [`calibration`]: capture sessions that cannot be applied
//! - [`profile`]: profile store invariants and persistence failures
//! - [`common`]: the top-level [`GcfeederError`] plus severity and category
//!   classification shared by all of them
//!
//! None of these errors terminate the process. A [`SchemaError::Mismatch`]
//! aborts traversal of its own subtree only; everything else leaves the caller
//! with its in-memory state intact.
//!
//! # Example
//!
//! ```
//! use gcfeeder_errors::{GcfeederError, ProfileError};
//!
//! fn remove(names: &mut Vec<String>, name: &str) -> Result<(), GcfeederError> {
//!     if names.len() <= 1 {
//!         return Err(ProfileError::last_profile(name).into());
//!     }
//!     names.retain(|n| n != name);
//!     Ok(())
//! }
//!
//! let mut names = vec!["default".to_string()];
//! assert!(remove(&mut names, "default").is_err());
//! assert_eq!(names.len(), 1);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod calibration;
pub mod common;
pub mod profile;
pub mod schema;

pub use calibration::CalibrationError;
pub use common::{ErrorCategory, ErrorSeverity, GcfeederError};
pub use profile::ProfileError;
pub use schema::SchemaError;

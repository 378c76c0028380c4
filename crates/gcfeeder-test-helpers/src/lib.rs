//! Shared test utilities for gcfeeder.
//!
//! - [`mod@must`]: unwrap helpers with `#[track_caller]` messages
//! - [`fixtures`]: a store schema and a sample store document
//! - [`init_test_tracing`]: route `tracing` output to the test harness
//!
//! ```rust,ignore
//! use gcfeeder_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod fixtures;
pub mod must;
pub mod prelude;

pub use must::*;

/// Install a test-writer subscriber filtered by `RUST_LOG` (default
/// `debug`). Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    let _installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init()
        .is_ok();
}

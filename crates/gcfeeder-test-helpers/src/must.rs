//! Unwrap helpers with useful panic messages.
//!
//! Library code never unwraps; tests that would rather fail loudly than
//! thread a `Result` through use these instead of `unwrap()`/`expect()`.

use std::fmt::Debug;
use std::str::FromStr;

/// Unwrap a `Result`, panicking with the error on failure.
///
/// ```rust
/// use gcfeeder_test_helpers::must;
///
/// let result: Result<u8, &str> = Ok(128);
/// assert_eq!(must(result), 128);
/// ```
///
/// # Panics
///
/// Panics if the result is `Err`.
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Unwrap an `Option`, panicking with `msg` if `None`.
///
/// # Panics
///
/// Panics if the option is `None`.
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}

/// Unwrap a `Result` with a context message.
///
/// # Panics
///
/// Panics if the result is `Err`.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must_with: {context}: {e:?}"),
    }
}

/// Parse a string, panicking on failure.
///
/// ```rust
/// use gcfeeder_schema::DocumentPath;
/// use gcfeeder_test_helpers::must_parse;
///
/// let path: DocumentPath = must_parse("calibration.trigger_data.l_trigger.min");
/// assert_eq!(path.last_key(), Some("min"));
/// ```
///
/// # Panics
///
/// Panics if parsing fails.
#[track_caller]
pub fn must_parse<T: FromStr>(s: &str) -> T
where
    T::Err: Debug,
{
    s.parse()
        .unwrap_or_else(|e| panic!("must_parse: failed to parse {s:?}: {e:?}"))
}

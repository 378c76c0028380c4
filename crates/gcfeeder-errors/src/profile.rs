//! Profile store error types.
//!
//! Invariant violations ([`ProfileError::NotFound`], [`ProfileError::DuplicateName`],
//! [`ProfileError::LastProfile`]) leave the store untouched. Persistence
//! failures ([`ProfileError::Io`], [`ProfileError::InvalidFormat`]) leave the
//! in-memory state as it was before the call.

use crate::common::ErrorSeverity;

/// Profile store errors.
///
/// # Examples
///
/// ```
/// use gcfeeder_errors::{ErrorSeverity, ProfileError};
///
/// let err = ProfileError::not_found("competitive");
/// assert_eq!(err.severity(), ErrorSeverity::Error);
/// assert!(!err.is_storage_error());
///
/// let err = ProfileError::io("/home/me/.config/gcfeeder/config.json", "permission denied");
/// assert!(err.is_storage_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// No profile with this name exists
    #[error("Profile not found: {0}")]
    NotFound(String),

    /// A profile with this name already exists
    #[error("Profile already exists: {0}")]
    DuplicateName(String),

    /// The profile is the only one left and cannot be removed
    #[error("Cannot remove '{0}': a store must keep at least one profile")]
    LastProfile(String),

    /// Reading or writing the backing store failed
    #[error("Profile store I/O failed for {path}: {reason}")]
    Io {
        /// Backing store location
        path: String,
        /// Failure reason
        reason: String,
    },

    /// The backing document is not a profile store document
    #[error("Invalid profile store format in {path}: {reason}")]
    InvalidFormat {
        /// Backing store location
        path: String,
        /// What is wrong with the document
        reason: String,
    },
}

impl ProfileError {
    /// Create a not found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        ProfileError::NotFound(name.into())
    }

    /// Create a duplicate name error.
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        ProfileError::DuplicateName(name.into())
    }

    /// Create a last profile error.
    pub fn last_profile(name: impl Into<String>) -> Self {
        ProfileError::LastProfile(name.into())
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ProfileError::Io {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid format error.
    pub fn invalid_format(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ProfileError::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ProfileError::NotFound(_) => ErrorSeverity::Error,
            ProfileError::DuplicateName(_) => ErrorSeverity::Warning,
            ProfileError::LastProfile(_) => ErrorSeverity::Warning,
            ProfileError::Io { .. } => ErrorSeverity::Error,
            ProfileError::InvalidFormat { .. } => ErrorSeverity::Error,
        }
    }

    /// Check whether this error came from the backing store.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            ProfileError::Io { .. } | ProfileError::InvalidFormat { .. }
        )
    }
}

//! Schema and document shape errors.
//!
//! These are produced while walking a document against its schema. They are
//! field-local: an error at one path never prevents sibling fields from being
//! rendered or edited.

use crate::common::ErrorSeverity;

/// Errors raised while interpreting a document against a schema.
///
/// # Examples
///
/// ```
/// use gcfeeder_errors::{ErrorSeverity, SchemaError};
///
/// let err = SchemaError::mismatch("calibration.enabled", "property missing from document");
/// assert!(err.is_subtree_fatal());
/// assert_eq!(err.severity(), ErrorSeverity::Error);
///
/// let err = SchemaError::unsupported("driver", "non-enum strings unsupported");
/// assert!(!err.is_subtree_fatal());
/// assert_eq!(err.path(), "driver");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The document does not have the shape the schema declares.
    #[error("Schema mismatch at '{path}': {reason}")]
    Mismatch {
        /// Path of the offending node
        path: String,
        /// What was expected
        reason: String,
    },

    /// The schema uses a construct the editor does not implement.
    #[error("Unsupported schema at '{path}': {reason}")]
    Unsupported {
        /// Path of the offending field
        path: String,
        /// Which construct is unsupported
        reason: String,
    },

    /// A requested edit is not allowed by the schema.
    #[error("Invalid edit at '{path}': {reason}")]
    InvalidEdit {
        /// Path of the edited field
        path: String,
        /// Why the edit was refused
        reason: String,
    },

    /// The schema descriptor itself could not be parsed.
    #[error("Invalid schema descriptor: {0}")]
    InvalidDescriptor(String),
}

impl SchemaError {
    /// Create a shape mismatch error.
    pub fn mismatch(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Mismatch {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported construct error.
    pub fn unsupported(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Unsupported {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid edit error.
    pub fn invalid_edit(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::InvalidEdit {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SchemaError::Mismatch { .. } => ErrorSeverity::Error,
            SchemaError::Unsupported { .. } => ErrorSeverity::Warning,
            SchemaError::InvalidEdit { .. } => ErrorSeverity::Warning,
            SchemaError::InvalidDescriptor(_) => ErrorSeverity::Error,
        }
    }

    /// Whether traversal of the subtree at [`path`](Self::path) must stop.
    pub fn is_subtree_fatal(&self) -> bool {
        matches!(self, SchemaError::Mismatch { .. })
    }

    /// The document path this error refers to. Empty for descriptor errors.
    pub fn path(&self) -> &str {
        match self {
            SchemaError::Mismatch { path, .. }
            | SchemaError::Unsupported { path, .. }
            | SchemaError::InvalidEdit { path, .. } => path,
            SchemaError::InvalidDescriptor(_) => "",
        }
    }
}

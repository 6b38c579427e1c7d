//! Error types for namespace operations.

use thiserror::Error;

/// Errors that can occur during namespace operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    /// The path does not resolve to a node of the kind the operation needs.
    #[error("object not found: {path}")]
    NotFound { path: String },

    /// The path is not a well-formed absolute path, or names a node the
    /// operation may not touch (the root).
    #[error("invalid path: {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// An engine fault unrelated to the caller's input.
    #[error("internal error: {0}")]
    Internal(String),
}

impl NamespaceError {
    pub(crate) fn not_found(path: &str) -> Self {
        Self::NotFound {
            path: path.to_string(),
        }
    }

    pub(crate) fn invalid(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`NamespaceError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience type alias for namespace operations.
pub type Result<T> = std::result::Result<T, NamespaceError>;

//! Folder import error types.

use thiserror::Error;

use super::types::{ReadFailure, ReadFailureKind};

/// Errors that abort a folder import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A file could not be read or decoded as text.
    #[error("failed to read '{path}': {reason}")]
    ReadFailed { path: String, reason: String },

    /// A file read did not complete in time.
    #[error("reading '{path}' timed out after {timeout_ms}ms")]
    ReadTimeout { path: String, timeout_ms: u64 },

    /// The folder to collect does not exist or is not a directory.
    #[error("folder not found: {path}")]
    FolderNotFound { path: String },

    /// Walking the folder on disk failed.
    #[error("failed to walk folder '{path}': {reason}")]
    WalkFailed { path: String, reason: String },
}

impl From<ReadFailure> for ImportError {
    fn from(failure: ReadFailure) -> Self {
        match failure.kind {
            ReadFailureKind::TimedOut { timeout_ms } => ImportError::ReadTimeout {
                path: failure.path,
                timeout_ms,
            },
            _ => ImportError::ReadFailed {
                path: failure.path,
                reason: failure.reason,
            },
        }
    }
}

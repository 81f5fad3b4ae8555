//! Staging store error types.

use thiserror::Error;

use super::types::ChangeStatus;

/// Errors that can occur during staging operations.
#[derive(Debug, Error)]
pub enum StagingError {
    /// The change input is unusable (e.g. empty path).
    #[error("invalid staged change: {reason}")]
    InvalidInput { reason: String },

    /// Another change already uses this action id.
    #[error("action '{action_id}' is already staged")]
    DuplicateAction { action_id: String },

    /// The same message already staged this path.
    #[error("path '{file_path}' already staged by message '{message_id}'")]
    DuplicatePath {
        file_path: String,
        message_id: String,
    },

    /// No change with this id.
    #[error("staged change not found: '{id}'")]
    NotFound { id: String },

    /// The change already left `Pending`.
    #[error("staged change '{id}' is not pending (status: {status:?})")]
    NotPending { id: String, status: ChangeStatus },

    /// The store lock was poisoned by a panicking writer.
    #[error("staging store lock poisoned: {reason}")]
    LockPoisoned { reason: String },
}

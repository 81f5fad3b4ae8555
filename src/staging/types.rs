//! Shared types for the staging store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Change Records ─────────────────────────────────────────────────────────

/// Kind of file change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Create,
    Modify,
    Delete,
}

/// Lifecycle status of a staged change.
///
/// `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ChangeStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ChangeStatus::Pending)
    }
}

/// Input for `StagingStore::stage`.
#[derive(Debug, Clone)]
pub struct NewStagedChange {
    pub file_path: String,
    pub change_type: ChangeType,
    /// Content before the change. `None` for new files.
    pub original_content: Option<String>,
    pub new_content: String,
    /// Caller-supplied correlation token, unique across the store.
    pub action_id: String,
    pub message_id: String,
    pub description: String,
}

/// A change held by the staging store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedChange {
    pub id: String,
    pub file_path: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub original_content: Option<String>,
    pub new_content: String,
    pub status: ChangeStatus,
    pub action_id: String,
    pub message_id: String,
    pub description: String,
    /// Hex SHA-256 of `new_content`.
    pub content_digest: String,
    pub created_at: DateTime<Utc>,
    /// Set when the change leaves `Pending`.
    pub resolved_at: Option<DateTime<Utc>>,
}

// ─── Policies ───────────────────────────────────────────────────────────────

/// What `accept`/`reject` do when the change is no longer pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptPolicy {
    /// Leave the record untouched and report `false`.
    #[default]
    Ignore,
    /// Fail with `StagingError::NotPending`.
    Strict,
}

/// What `stage` does when the same message already staged the same path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePathPolicy {
    /// Fail with `StagingError::DuplicatePath`.
    #[default]
    Reject,
    /// Drop the earlier record and stage the new one.
    Replace,
    /// Keep the earlier record and return it unchanged.
    KeepFirst,
}

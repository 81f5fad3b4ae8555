//! Shared types for the folder import pipeline.

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::staging::ChangeStatus;

/// A successfully read text file, with its path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedFile {
    pub path: String,
    pub content: String,
}

/// How the pipeline reacts to a file that cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadPolicy {
    /// Abort the whole import before anything is staged.
    #[default]
    FailFast,
    /// Import what could be read and report the rest.
    CollectPartial,
}

// ─── Failures ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ReadFailureKind {
    Io,
    InvalidUtf8,
    TimedOut { timeout_ms: u64 },
}

/// A file that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFailure {
    /// Path as supplied by the caller (including the folder segment).
    pub path: String,
    pub kind: ReadFailureKind,
    pub reason: String,
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Result of staging one imported file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum StageResult {
    /// Staged and accepted by this import.
    Accepted { change_id: String },
    /// The store returned a change that had already left `Pending`.
    AlreadyResolved {
        change_id: String,
        status: ChangeStatus,
    },
    /// Accepted by this import, then replaced by a later file with the same
    /// path. The store no longer holds `change_id`.
    Superseded {
        change_id: String,
        replaced_by: String,
    },
    /// The store refused the change.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    pub path: String,
    pub result: StageResult,
}

/// Everything a folder import produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Batch id shared by every staged change; also the summary message id.
    pub message_id: String,
    /// `[user, summary, (setup request), (commands)]`.
    pub messages: Vec<ChatMessage>,
    /// One entry per successfully read file, in input order.
    /// Only `Accepted` entries name a change the store still holds as this
    /// import's version of that path.
    pub outcomes: Vec<FileOutcome>,
    /// Only populated under `ReadPolicy::CollectPartial`.
    pub read_failures: Vec<ReadFailure>,
}

impl ImportReport {
    pub fn accepted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, StageResult::Accepted { .. }))
            .count()
    }

    /// Files the staging store refused.
    pub fn staging_failures(&self) -> Vec<&FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, StageResult::Failed { .. }))
            .collect()
    }

    /// Every file read and every file staged as its own accepted change.
    pub fn is_complete(&self) -> bool {
        self.read_failures.is_empty()
            && self
                .outcomes
                .iter()
                .all(|o| matches!(o.result, StageResult::Accepted { .. }))
    }
}

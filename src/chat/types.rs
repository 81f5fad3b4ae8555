//! Chat message types returned to the frontend chat history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::generate_id;
use crate::project_commands::ProjectCommands;

/// Message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message in the chat history.
///
/// `commands` carries the structured setup/start payload for the message
/// produced by the command detector; it is `None` for every other message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<ProjectCommands>,
}

impl ChatMessage {
    /// Build a message with an explicit id, stamped with the current time.
    pub fn with_id(id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            created_at: Utc::now(),
            commands: None,
        }
    }

    /// Build a user message with a fresh id.
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_id(generate_id(), Role::User, content)
    }

    /// Build an assistant message with a fresh id.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_id(generate_id(), Role::Assistant, content)
    }

    /// Attach a structured commands payload.
    pub fn with_commands(mut self, commands: ProjectCommands) -> Self {
        self.commands = Some(commands);
        self
    }
}

//! Formatting detected commands into a chat message.

use super::types::ProjectCommands;
use crate::chat::ChatMessage;

/// Build the assistant message that proposes the project's commands.
///
/// Returns `None` when there is neither a setup nor a start command.
pub fn create_commands_message(commands: &ProjectCommands) -> Option<ChatMessage> {
    if commands.is_empty() {
        return None;
    }

    let mut content = format!(
        "Project setup for this {} project:\n",
        commands.project_type.label()
    );
    if let Some(setup) = &commands.setup_command {
        content.push_str(&format!("\n- Setup: `{setup}`"));
    }
    if let Some(start) = &commands.start_command {
        content.push_str(&format!("\n- Start: `{start}`"));
    }
    if let Some(followup) = &commands.followup_message {
        content.push_str(&format!("\n\n{followup}"));
    }

    Some(ChatMessage::assistant(content).with_commands(commands.clone()))
}

//! Chat text produced by a folder import.

use super::types::{FileOutcome, ReadFailure, StageResult};

pub const SETUP_REQUEST: &str = "Setup the codebase and Start the application";

pub fn import_request(folder_name: &str) -> String {
    format!("Import the \"{folder_name}\" folder")
}

/// Assistant summary of an import.
///
/// Only files whose outcome is `Accepted` are listed as imported. The other
/// notes are only present when something went wrong, so a clean import
/// always renders the same text for the same folder.
pub fn import_summary(
    folder_name: &str,
    outcomes: &[FileOutcome],
    binary_files: &[String],
    read_failures: &[ReadFailure],
) -> String {
    let binary_note = if binary_files.is_empty() {
        String::new()
    } else {
        format!(
            "\n\nSkipped {} binary files:\n{}",
            binary_files.len(),
            bullet_list(binary_files.iter().map(|f| f.to_string()))
        )
    };

    let accepted: Vec<&FileOutcome> = outcomes
        .iter()
        .filter(|o| matches!(o.result, StageResult::Accepted { .. }))
        .collect();
    let imported = bullet_list(accepted.iter().map(|o| format!("`{}`", o.path)));

    let mut summary = format!(
        "I've imported the contents of the \"{folder_name}\" folder.{binary_note}\n\n\
         **Files imported ({}):**\n{imported}\n\n\
         The files have been added to your project and are ready to use.",
        accepted.len()
    );

    if !read_failures.is_empty() {
        push_note(
            &mut summary,
            "Failed to read",
            read_failures
                .iter()
                .map(|f| format!("`{}`: {}", f.path, f.reason))
                .collect(),
        );
    }

    let mut replaced = Vec::new();
    let mut kept_earlier = Vec::new();
    let mut refused = Vec::new();
    for outcome in outcomes {
        match &outcome.result {
            StageResult::Accepted { .. } => {}
            StageResult::Superseded { .. } => replaced.push(format!("`{}`", outcome.path)),
            StageResult::AlreadyResolved { status, .. } => {
                kept_earlier.push(format!("`{}` (earlier version {status:?})", outcome.path))
            }
            StageResult::Failed { reason } => refused.push(format!("`{}`: {reason}", outcome.path)),
        }
    }
    push_note(&mut summary, "Replaced by a later file", replaced);
    push_note(&mut summary, "Kept earlier version", kept_earlier);
    push_note(&mut summary, "Failed to stage", refused);

    summary
}

fn push_note(summary: &mut String, title: &str, items: Vec<String>) {
    if items.is_empty() {
        return;
    }
    summary.push_str(&format!(
        "\n\n**{title} ({}):**\n{}",
        items.len(),
        bullet_list(items.into_iter())
    ));
}

fn bullet_list(items: impl Iterator<Item = String>) -> String {
    items
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

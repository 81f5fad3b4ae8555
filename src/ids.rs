//! Identifier generation for chat messages and staged actions.

use uuid::Uuid;

/// Generate a fresh identifier for a chat message or staged change.
///
/// Identifiers are random (UUID v4, hyphen-free) so two imports of the same
/// folder never share ids.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Correlation token linking a staged file to the import batch that created it.
pub fn import_action_id(message_id: &str, path: &str) -> String {
    format!("import-{message_id}-{path}")
}

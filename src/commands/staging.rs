//! Commands for reviewing staged changes.

use crate::staging::StagedChange;
use crate::state::AppState;

/// List every staged change in the session, oldest first.
pub fn list_staged_changes(state: &AppState) -> Result<Vec<StagedChange>, String> {
    state.staging.list().map_err(|e| e.to_string())
}

pub fn list_pending_changes(state: &AppState) -> Result<Vec<StagedChange>, String> {
    state.staging.pending().map_err(|e| e.to_string())
}

/// Accept a change. Returns `false` if it was already resolved.
pub fn accept_change(state: &AppState, change_id: String) -> Result<bool, String> {
    let accepted = state.staging.accept(&change_id).map_err(|e| e.to_string())?;
    tracing::info!(change_id = %change_id, accepted, "accept_change");
    Ok(accepted)
}

/// Reject a change. Returns `false` if it was already resolved.
pub fn reject_change(state: &AppState, change_id: String) -> Result<bool, String> {
    let rejected = state.staging.reject(&change_id).map_err(|e| e.to_string())?;
    tracing::info!(change_id = %change_id, rejected, "reject_change");
    Ok(rejected)
}

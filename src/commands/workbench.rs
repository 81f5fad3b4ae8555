//! Commands for the workbench panel and header action bar.

use crate::state::AppState;
use crate::workbench::{HeaderActions, PreviewInfo, WorkbenchView};

pub fn get_header_actions(state: &AppState) -> HeaderActions {
    state.workbench.header_actions()
}

/// Handler for the Versions button.
pub fn toggle_versions_view(state: &AppState) -> WorkbenchView {
    let view = state.workbench.toggle_versions();
    tracing::debug!(view = ?view, "toggle_versions_view");
    view
}

pub fn set_workbench_visible(state: &AppState, visible: bool) -> bool {
    state.workbench.set_visible(visible);
    state.workbench.is_visible()
}

/// Replace the preview list reported by the runtime.
pub fn update_previews(state: &AppState, previews: Vec<PreviewInfo>) -> HeaderActions {
    state.workbench.set_previews(previews);
    state.workbench.header_actions()
}

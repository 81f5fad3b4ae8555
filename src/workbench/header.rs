//! Header action bar state.
//!
//! The Versions and Deploy buttons only make sense once the app has a
//! running preview, so both are hidden until one exists at the active index.

use super::types::{HeaderActions, PreviewInfo, WorkbenchView};

/// Preview index the header tracks. Only the first preview is surfaced.
const ACTIVE_PREVIEW_INDEX: usize = 0;

/// Compute header button visibility from the previews and current view.
pub fn header_actions(previews: &[PreviewInfo], view: WorkbenchView) -> HeaderActions {
    let has_preview = previews.get(ACTIVE_PREVIEW_INDEX).is_some();
    HeaderActions {
        show_versions: has_preview,
        show_deploy: has_preview,
        versions_active: view == WorkbenchView::Versions,
    }
}

/// View selected by clicking the Versions button.
pub fn toggled_versions_view(current: WorkbenchView) -> WorkbenchView {
    if current == WorkbenchView::Versions {
        WorkbenchView::Code
    } else {
        WorkbenchView::Versions
    }
}

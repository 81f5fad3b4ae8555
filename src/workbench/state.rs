//! WorkbenchState — UI flags shared between the backend and the frontend.
//!
//! Visibility and the current view are `watch` channels so other parts of
//! the application can observe changes without polling.

use std::sync::RwLock;

use tokio::sync::watch;

use super::header;
use super::types::{HeaderActions, PreviewInfo, WorkbenchView};

pub struct WorkbenchState {
    show_workbench: watch::Sender<bool>,
    current_view: watch::Sender<WorkbenchView>,
    previews: RwLock<Vec<PreviewInfo>>,
}

impl Default for WorkbenchState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbenchState {
    pub fn new() -> Self {
        let (show_workbench, _) = watch::channel(false);
        let (current_view, _) = watch::channel(WorkbenchView::default());
        Self {
            show_workbench,
            current_view,
            previews: RwLock::new(Vec::new()),
        }
    }

    // ─── Visibility ─────────────────────────────────────────────────────

    /// Make the workbench visible. Idempotent; observers are only woken on change.
    pub fn show(&self) {
        self.set_visible(true);
    }

    pub fn hide(&self) {
        self.set_visible(false);
    }

    pub fn set_visible(&self, visible: bool) {
        let changed = self.show_workbench.send_if_modified(|current| {
            if *current == visible {
                false
            } else {
                *current = visible;
                true
            }
        });
        if changed {
            tracing::debug!(visible, "workbench visibility changed");
        }
    }

    pub fn is_visible(&self) -> bool {
        *self.show_workbench.borrow()
    }

    /// Observe visibility changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.show_workbench.subscribe()
    }

    // ─── View ───────────────────────────────────────────────────────────

    pub fn current_view(&self) -> WorkbenchView {
        *self.current_view.borrow()
    }

    pub fn set_view(&self, view: WorkbenchView) {
        self.current_view.send_replace(view);
    }

    /// Switch between the versions view and the code view.
    pub fn toggle_versions(&self) -> WorkbenchView {
        let next = header::toggled_versions_view(self.current_view());
        self.set_view(next);
        next
    }

    pub fn subscribe_view(&self) -> watch::Receiver<WorkbenchView> {
        self.current_view.subscribe()
    }

    // ─── Previews ───────────────────────────────────────────────────────

    pub fn set_previews(&self, previews: Vec<PreviewInfo>) {
        match self.previews.write() {
            Ok(mut guard) => *guard = previews,
            Err(poisoned) => *poisoned.into_inner() = previews,
        }
    }

    pub fn previews(&self) -> Vec<PreviewInfo> {
        match self.previews.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn header_actions(&self) -> HeaderActions {
        header::header_actions(&self.previews(), self.current_view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_by_default() {
        let wb = WorkbenchState::new();
        assert!(!wb.is_visible());
        assert_eq!(wb.current_view(), WorkbenchView::Code);
    }

    #[tokio::test]
    async fn test_show_notifies_subscribers_once() {
        let wb = WorkbenchState::new();
        let mut rx = wb.subscribe();

        wb.show();
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());

        // second show is a no-op
        wb.show();
        assert!(!rx.has_changed().unwrap());
        assert!(wb.is_visible());
    }

    #[test]
    fn test_show_without_subscribers() {
        let wb = WorkbenchState::new();
        wb.show();
        assert!(wb.is_visible());
        wb.hide();
        assert!(!wb.is_visible());
    }

    #[test]
    fn test_toggle_versions_round_trip() {
        let wb = WorkbenchState::new();
        assert_eq!(wb.toggle_versions(), WorkbenchView::Versions);
        assert_eq!(wb.toggle_versions(), WorkbenchView::Code);
    }

    #[test]
    fn test_header_actions_follow_previews() {
        let wb = WorkbenchState::new();
        assert!(!wb.header_actions().show_deploy);

        wb.set_previews(vec![PreviewInfo {
            port: 3000,
            base_url: "http://localhost:3000".into(),
            ready: false,
        }]);
        wb.toggle_versions();
        let actions = wb.header_actions();
        assert!(actions.show_deploy);
        assert!(actions.versions_active);
    }
}

//! Workbench — visibility flag, current view, and header actions.

pub mod header;
pub mod state;
pub mod types;

pub use state::WorkbenchState;
pub use types::{HeaderActions, PreviewInfo, WorkbenchView};

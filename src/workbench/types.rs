//! Shared workbench types.

use serde::{Deserialize, Serialize};

/// Panel shown in the workbench.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkbenchView {
    #[default]
    Code,
    Diff,
    Preview,
    Versions,
}

/// A running application preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewInfo {
    pub port: u16,
    pub base_url: String,
    pub ready: bool,
}

/// Which header buttons the frontend should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderActions {
    pub show_versions: bool,
    pub show_deploy: bool,
    /// The Versions button is highlighted while the versions view is open.
    pub versions_active: bool,
}

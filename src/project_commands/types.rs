//! Types describing the commands suggested for an imported project.

use serde::{Deserialize, Serialize};

/// Kind of project recognised by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "Node.js")]
    Node,
    #[serde(rename = "Static")]
    Static,
}

impl ProjectType {
    pub fn label(self) -> &'static str {
        match self {
            ProjectType::Node => "Node.js",
            ProjectType::Static => "Static",
        }
    }
}

/// Setup/start commands suggested for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCommands {
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followup_message: Option<String>,
}

impl ProjectCommands {
    /// `true` when there is nothing to run.
    pub fn is_empty(&self) -> bool {
        self.setup_command.is_none() && self.start_command.is_none()
    }
}

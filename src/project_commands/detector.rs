//! Command detection from project manifests.
//!
//! Detection order:
//! 1. `package.json` → Node.js project; `npm install`, then the first of the
//!    `dev` / `start` / `preview` scripts.
//! 2. `index.html` → static site served with `npx --yes serve`.
//! 3. Anything else → no commands.

use async_trait::async_trait;

use super::errors::DetectorError;
use super::types::{ProjectCommands, ProjectType};
use crate::folder_import::ImportedFile;

/// Scripts tried in order when picking the start command.
const PREFERRED_SCRIPTS: [&str; 3] = ["dev", "start", "preview"];

const NODE_SETUP_COMMAND: &str = "npm install";
const STATIC_START_COMMAND: &str = "npx --yes serve";

/// Infers setup/start commands for an imported batch of files.
#[async_trait]
pub trait CommandDetector: Send + Sync {
    /// Returns `Ok(None)` when the project type is not recognised.
    async fn detect(&self, files: &[ImportedFile]) -> Result<Option<ProjectCommands>, DetectorError>;
}

/// Detector driven by well-known manifest files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestDetector;

#[async_trait]
impl CommandDetector for ManifestDetector {
    async fn detect(&self, files: &[ImportedFile]) -> Result<Option<ProjectCommands>, DetectorError> {
        if let Some(manifest) = find_file(files, "package.json") {
            return detect_node(manifest).map(Some);
        }

        if find_file(files, "index.html").is_some() {
            return Ok(Some(ProjectCommands {
                project_type: ProjectType::Static,
                setup_command: None,
                start_command: Some(STATIC_START_COMMAND.to_string()),
                followup_message: None,
            }));
        }

        Ok(None)
    }
}

/// Find the shallowest file with the given name.
fn find_file<'a>(files: &'a [ImportedFile], name: &str) -> Option<&'a ImportedFile> {
    files
        .iter()
        .filter(|f| f.path.rsplit('/').next() == Some(name))
        .min_by_key(|f| f.path.matches('/').count())
}

fn detect_node(manifest: &ImportedFile) -> Result<ProjectCommands, DetectorError> {
    let package: serde_json::Value =
        serde_json::from_str(&manifest.content).map_err(|e| DetectorError::InvalidManifest {
            path: manifest.path.clone(),
            reason: e.to_string(),
        })?;

    let scripts = package.get("scripts").and_then(|s| s.as_object());
    let script = PREFERRED_SCRIPTS.iter().find(|name| {
        scripts
            .and_then(|s| s.get(**name))
            .is_some_and(|v| v.as_str().is_some_and(|cmd| !cmd.is_empty()))
    });

    Ok(match script {
        Some(script) => ProjectCommands {
            project_type: ProjectType::Node,
            setup_command: Some(NODE_SETUP_COMMAND.to_string()),
            start_command: Some(format!("npm run {script}")),
            followup_message: Some(format!(
                "Found \"{script}\" script in package.json. Running \"npm run {script}\" after installation."
            )),
        },
        None => ProjectCommands {
            project_type: ProjectType::Node,
            setup_command: Some(NODE_SETUP_COMMAND.to_string()),
            start_command: None,
            followup_message: Some(
                "Would you like me to inspect package.json to determine the available scripts for running this project?"
                    .to_string(),
            ),
        },
    })
}

// ─── Tests ──────────────────────────────────────────────────────────────────

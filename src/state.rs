//! Application state for one workbench session.
//!
//! Services are created together at session start and passed to the
//! frontend commands by reference; nothing here is a process global.

use std::sync::Arc;

use anyhow::Context;

use crate::config::{self, DevbenchConfig};
use crate::folder_import::FolderImporter;
use crate::mcp_config::{ConfigValidatingProvider, ToolProvider};
use crate::project_commands::{CommandDetector, ManifestDetector};
use crate::staging::StagingStore;
use crate::workbench::WorkbenchState;

pub struct AppState {
    pub config: DevbenchConfig,
    pub staging: Arc<StagingStore>,
    pub workbench: Arc<WorkbenchState>,
    pub importer: FolderImporter,
    pub tool_provider: Arc<dyn ToolProvider>,
}

impl AppState {
    /// Build a session with the default detector and tool provider.
    pub fn new(config: DevbenchConfig) -> Self {
        Self::with_services(
            config,
            Arc::new(ManifestDetector),
            Arc::new(ConfigValidatingProvider::new()),
        )
    }

    pub fn with_services(
        config: DevbenchConfig,
        detector: Arc<dyn CommandDetector>,
        tool_provider: Arc<dyn ToolProvider>,
    ) -> Self {
        let staging = Arc::new(StagingStore::new(
            config.staging.accept_policy,
            config.staging.duplicate_paths,
        ));
        let workbench = Arc::new(WorkbenchState::new());
        let importer = FolderImporter::new(
            Arc::clone(&staging),
            Arc::clone(&workbench),
            detector,
            config.import.clone(),
        );

        Self {
            config,
            staging,
            workbench,
            importer,
            tool_provider,
        }
    }

    /// End the session: drop staged changes and hide the workbench.
    pub fn shutdown(&self) {
        match self.staging.clear() {
            Ok(count) => tracing::info!(discarded = count, "session ended"),
            Err(e) => tracing::warn!(error = %e, "failed to clear staging store"),
        }
        self.workbench.hide();
    }
}

/// Start a session: load config, initialize logging, build the state.
pub fn bootstrap() -> anyhow::Result<AppState> {
    let config = config::load_or_default();
    crate::init_tracing(&config.logging.filter).context("failed to initialize logging")?;

    tracing::info!(
        read_policy = ?config.import.read_policy,
        read_timeout_ms = ?config.import.read_timeout_ms,
        accept_policy = ?config.staging.accept_policy,
        duplicate_paths = ?config.staging.duplicate_paths,
        "devbench session starting"
    );

    Ok(AppState::new(config))
}

//! Tool providers that accept MCP configuration updates.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::errors::McpConfigError;
use super::types::{McpConfig, McpServerConfig, McpServerStatus, ServerAvailability, ServerTools};

/// Service that owns the MCP server connections.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Replace the active configuration and report each server's tools.
    async fn update_config(&self, config: McpConfig) -> Result<ServerTools, McpConfigError>;
}

/// Provider that validates and stores configuration without connecting.
///
/// Each well-formed server is reported `available` with no tools; malformed
/// entries are `unavailable` with the validation error.
#[derive(Default)]
pub struct ConfigValidatingProvider {
    current: RwLock<McpConfig>,
}

impl ConfigValidatingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last configuration applied.
    pub fn current(&self) -> Result<McpConfig, McpConfigError> {
        self.current
            .read()
            .map(|cfg| cfg.clone())
            .map_err(|e| McpConfigError::ProviderFailed {
                reason: format!("lock poisoned: {e}"),
            })
    }
}

#[async_trait]
impl ToolProvider for ConfigValidatingProvider {
    async fn update_config(&self, config: McpConfig) -> Result<ServerTools, McpConfigError> {
        let statuses: ServerTools = config
            .mcp_servers
            .iter()
            .map(|(name, server)| {
                let status = match validate_server(server) {
                    Ok(()) => McpServerStatus {
                        status: ServerAvailability::Available,
                        tools: BTreeMap::new(),
                        error: None,
                    },
                    Err(reason) => {
                        tracing::warn!(server = %name, reason = %reason, "invalid MCP server config");
                        McpServerStatus {
                            status: ServerAvailability::Unavailable,
                            tools: BTreeMap::new(),
                            error: Some(reason),
                        }
                    }
                };
                (name.clone(), status)
            })
            .collect();

        let mut current = self
            .current
            .write()
            .map_err(|e| McpConfigError::ProviderFailed {
                reason: format!("lock poisoned: {e}"),
            })?;
        *current = config;

        tracing::info!(servers = statuses.len(), "MCP config updated");
        Ok(statuses)
    }
}

fn validate_server(server: &McpServerConfig) -> Result<(), String> {
    match server {
        McpServerConfig::Stdio { command, .. } => {
            if command.trim().is_empty() {
                return Err("stdio server requires a command".to_string());
            }
        }
        McpServerConfig::Sse { url, .. } | McpServerConfig::StreamableHttp { url, .. } => {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("url must be http(s): '{url}'"));
            }
        }
    }
    Ok(())
}

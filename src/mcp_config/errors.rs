//! Tool-provider configuration error types.

use thiserror::Error;

/// Errors that can occur while applying an MCP configuration.
#[derive(Debug, Error)]
pub enum McpConfigError {
    /// The request body is not a JSON object of the expected shape.
    #[error("invalid MCP servers configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The tool provider failed to apply the configuration.
    #[error("tool provider error: {reason}")]
    ProviderFailed { reason: String },
}

//! Update-config route: validates the request body and forwards it to the
//! tool provider.
//!
//! | Body                                  | Status |
//! |---------------------------------------|--------|
//! | not a JSON object / wrong shape       | 400    |
//! | malformed JSON, provider failure      | 500    |
//! | applied                               | 200    |

use serde::Serialize;

use super::errors::McpConfigError;
use super::provider::ToolProvider;
use super::types::McpConfig;

const INVALID_CONFIG_MESSAGE: &str = "Invalid MCP servers configuration";
const UPDATE_FAILED_MESSAGE: &str = "Failed to update MCP config";

/// HTTP-style response produced by the route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl RouteResponse {
    fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }),
        }
    }
}

/// Handle a raw update-config request body.
pub async fn handle_update_config(provider: &dyn ToolProvider, body: &[u8]) -> RouteResponse {
    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "error updating MCP config: malformed body");
            return RouteResponse::error(500, UPDATE_FAILED_MESSAGE);
        }
    };

    let config = match parse_config(value) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(error = %e, "rejected MCP config");
            return RouteResponse::error(400, INVALID_CONFIG_MESSAGE);
        }
    };

    let result = provider.update_config(config).await.and_then(|tools| {
        serde_json::to_value(tools).map_err(|e| McpConfigError::ProviderFailed {
            reason: e.to_string(),
        })
    });

    match result {
        Ok(body) => RouteResponse::ok(body),
        Err(e) => {
            tracing::error!(error = %e, "error updating MCP config");
            RouteResponse::error(500, UPDATE_FAILED_MESSAGE)
        }
    }
}

fn parse_config(value: serde_json::Value) -> Result<McpConfig, McpConfigError> {
    if !value.is_object() {
        return Err(McpConfigError::InvalidConfig {
            reason: "body is not a JSON object".to_string(),
        });
    }
    serde_json::from_value(value).map_err(|e| McpConfigError::InvalidConfig {
        reason: e.to_string(),
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

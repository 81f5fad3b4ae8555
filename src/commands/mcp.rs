//! Command for forwarding MCP configuration to the tool provider.

use crate::mcp_config::{handle_update_config, RouteResponse};
use crate::state::AppState;

/// Apply a raw MCP configuration body. Always returns a response; failures
/// are encoded in its status.
pub async fn update_mcp_config(state: &AppState, body: Vec<u8>) -> RouteResponse {
    handle_update_config(state.tool_provider.as_ref(), &body).await
}

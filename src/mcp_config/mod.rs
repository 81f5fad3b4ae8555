//! MCP config — forwards tool-provider configuration from the frontend.
//!
//! The MCP wire protocol itself lives behind the `ToolProvider` trait; this
//! module only validates the request and maps outcomes to status codes.

pub mod errors;
pub mod provider;
pub mod route;
pub mod types;

pub use errors::McpConfigError;
pub use provider::{ConfigValidatingProvider, ToolProvider};
pub use route::{handle_update_config, RouteResponse};
pub use types::{McpConfig, McpServerConfig, McpServerStatus, ServerAvailability, ServerTools};

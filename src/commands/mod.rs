//! Commands exposed to the frontend.
//!
//! Each command takes the session `AppState` and returns `Result<T, String>`
//! so errors serialize straight into the IPC response.

pub mod folder;
pub mod mcp;
pub mod staging;
pub mod workbench;

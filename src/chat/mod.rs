//! Chat transcript types produced by workbench operations.

pub mod types;

pub use types::{ChatMessage, Role};

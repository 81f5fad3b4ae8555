//! Command detector error types.

use thiserror::Error;

/// Errors raised while inferring project commands.
#[derive(Debug, Error)]
pub enum DetectorError {
    /// A manifest file exists but could not be parsed.
    #[error("invalid manifest '{path}': {reason}")]
    InvalidManifest { path: String, reason: String },
}

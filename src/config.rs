//! Workbench configuration loading.
//!
//! Reads `config.yaml` and resolves environment variables. Every section is
//! optional; a missing file yields the defaults.
//!
//! ```yaml
//! import:
//!   read_policy: fail_fast        # or collect_partial
//!   read_timeout_ms: 30000        # null disables the timeout
//! staging:
//!   accept_policy: ignore         # or strict
//!   duplicate_paths: reject       # or replace / keep_first
//! logging:
//!   filter: "devbench=debug,warn"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::folder_import::ReadPolicy;
use crate::staging::{AcceptPolicy, DuplicatePathPolicy};

/// Env var pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "DEVBENCH_CONFIG";

const CONFIG_FILE_NAME: &str = "config.yaml";

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },
}

// ─── Public Types ────────────────────────────────────────────────────────────

/// Folder import settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportConfig {
    #[serde(default)]
    pub read_policy: ReadPolicy,
    /// Per-file read timeout. `None` waits forever.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: Option<u64>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            read_policy: ReadPolicy::default(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

fn default_read_timeout_ms() -> Option<u64> {
    Some(30_000)
}

/// Staging store settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StagingConfig {
    #[serde(default)]
    pub accept_policy: AcceptPolicy,
    #[serde(default)]
    pub duplicate_paths: DuplicatePathPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "devbench=info,warn".to_string()
}

/// Top-level configuration (mirrors `config.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DevbenchConfig {
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub staging: StagingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Locate the config file: `DEVBENCH_CONFIG` first, then the data directory.
pub fn find_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(path);
        if candidate.exists() {
            return Some(candidate);
        }
        tracing::warn!(path = %candidate.display(), "{CONFIG_ENV_VAR} points at a missing file");
    }

    let candidate = crate::data_dir().join(CONFIG_FILE_NAME);
    candidate.exists().then_some(candidate)
}

/// Load and parse a config file, interpolating `${VAR}` / `${VAR:-default}`.
pub fn load_config(path: &Path) -> Result<DevbenchConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_config(&raw)
}

/// Parse config text. An empty document yields the defaults.
pub fn parse_config(raw: &str) -> Result<DevbenchConfig, ConfigError> {
    let interpolated = interpolate_env_vars(raw);
    if interpolated.trim().is_empty() {
        return Ok(DevbenchConfig::default());
    }
    serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::ParseFailed {
        reason: e.to_string(),
    })
}

/// Load from the resolved path, falling back to defaults on any problem.
pub fn load_or_default() -> DevbenchConfig {
    let Some(path) = find_config_path() else {
        return DevbenchConfig::default();
    };
    match load_config(&path) {
        Ok(cfg) => {
            tracing::info!(path = %path.display(), "loaded devbench config");
            cfg
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load devbench config, using defaults");
            DevbenchConfig::default()
        }
    }
}

// ─── Env-var interpolation ───────────────────────────────────────────────────

/// Replace `${VAR}` and `${VAR:-default}` in the raw config text.
///
/// Unset variables without a default become empty. An unterminated `${` is
/// copied through untouched so the YAML parser reports it in context.
fn interpolate_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                result.push_str(&resolve_var_expr(&after[..end]));
                rest = &after[end + 1..];
            }
            None => {
                tracing::warn!(fragment = %&rest[start..], "unterminated variable reference in config");
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);

    result
}

/// `NAME` or `NAME:-default`. Empty values count as unset for the default form.
fn resolve_var_expr(expr: &str) -> String {
    let expr = expr.trim();
    match expr.split_once(":-") {
        Some((name, default)) => std::env::var(name)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string()),
        None => std::env::var(expr).unwrap_or_default(),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

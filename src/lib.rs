pub mod chat;
pub mod commands;
pub mod config;
pub mod folder_import;
pub mod ids;
pub mod mcp_config;
pub mod project_commands;
pub mod staging;
pub mod state;
pub mod workbench;

pub use state::{bootstrap, AppState};

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Number of rotated log files kept next to the current one.
const LOG_KEEP: u32 = 3;

/// Return the platform-standard data directory for devbench.
///
/// - macOS: `~/Library/Application Support/devbench/`
/// - Windows: `{FOLDERID_RoamingAppData}\devbench\`
/// - Linux: `$XDG_DATA_HOME/devbench/` (fallback `~/.local/share/...`)
///
/// Falls back to `~/.devbench/` only if none of the above can be resolved.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = dirs::data_dir() {
        return dir.join("devbench");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".devbench")
}

/// Initialize the tracing subscriber, writing to `devbench.log` in the data directory.
///
/// Rotates existing logs first (devbench.log → .1 → .2 → .3). `RUST_LOG`
/// overrides `default_filter` when set.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = data_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;

    let log_path = log_dir.join("devbench.log");
    rotate_log_file(&log_path, LOG_KEEP);

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt::fmt()
        .with_env_filter(filter)
        .with_writer(FlushingWriter::new(log_file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already set: {e}"))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %log_dir.display(),
        log_file = %log_path.display(),
        pid = std::process::id(),
        "=== devbench starting ==="
    );
    Ok(())
}

/// `devbench.log` → `devbench.log.{index}`.
fn rotated_log_path(base_path: &Path, index: u32) -> PathBuf {
    let mut name = base_path.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

/// Rotate log files: `devbench.log` → `devbench.log.1` → … → `.{keep}`.
///
/// The file at `.{keep}` is dropped. Gaps in the chain are skipped. With
/// `keep == 0` the current log is simply removed.
fn rotate_log_file(base_path: &Path, keep: u32) {
    if keep == 0 {
        let _ = std::fs::remove_file(base_path);
        return;
    }

    let _ = std::fs::remove_file(rotated_log_path(base_path, keep));
    for i in (1..keep).rev() {
        let from = rotated_log_path(base_path, i);
        if from.exists() {
            let _ = std::fs::rename(&from, rotated_log_path(base_path, i + 1));
        }
    }
    if base_path.exists() {
        let _ = std::fs::rename(base_path, rotated_log_path(base_path, 1));
    }
}

/// Log sink shared by every `tracing` writer handle.
///
/// `tracing-subscriber` hands out a fresh writer per event; all of them
/// append to the same file and flush after each event, so the log is
/// complete up to the last line even if the process is killed mid-import.
#[derive(Clone)]
struct FlushingWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl FlushingWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }

    fn file(&self) -> std::io::Result<MutexGuard<'_, std::fs::File>> {
        self.file
            .lock()
            .map_err(|e| std::io::Error::other(format!("log file lock poisoned: {e}")))
    }
}

impl Write for FlushingWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut file = self.file()?;
        file.write_all(buf)?;
        file.flush()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file()?.flush()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for FlushingWriter {
    type Writer = FlushingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

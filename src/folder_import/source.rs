//! File handles consumed by the import pipeline.

use std::path::PathBuf;

use async_trait::async_trait;

/// A file selected for import.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Path relative to the parent of the imported folder, `/`-separated.
    /// The first segment is the folder name.
    fn relative_path(&self) -> &str;

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>>;
}

/// File content already held in memory (e.g. uploaded by the frontend).
#[derive(Debug, Clone)]
pub struct MemoryFile {
    pub relative_path: String,
    pub bytes: Vec<u8>,
}

impl MemoryFile {
    pub fn new(relative_path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            relative_path: relative_path.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl FileSource for MemoryFile {
    fn relative_path(&self) -> &str {
        &self.relative_path
    }

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// A file on the local disk.
#[derive(Debug, Clone)]
pub struct DiskFile {
    pub relative_path: String,
    pub absolute_path: PathBuf,
}

#[async_trait]
impl FileSource for DiskFile {
    fn relative_path(&self) -> &str {
        &self.relative_path
    }

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.absolute_path).await
    }
}

/// Drop the leading folder segment: `proj/src/a.ts` → `src/a.ts`.
///
/// Paths without a folder segment are returned unchanged.
pub fn strip_root_segment(path: &str) -> &str {
    match path.split_once('/') {
        Some((_, rest)) if !rest.is_empty() => rest,
        _ => path,
    }
}

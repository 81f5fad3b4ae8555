//! Commands for importing folders into the workbench.

use std::path::PathBuf;

use serde::Deserialize;

use crate::folder_import::{collect_folder, ImportReport, MemoryFile};
use crate::state::AppState;

/// A text file uploaded by the frontend folder picker.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Path relative to the picked folder's parent (`folder/sub/file`).
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFolderRequest {
    pub folder_name: String,
    pub files: Vec<UploadedFile>,
    #[serde(default)]
    pub binary_files: Vec<String>,
}

/// Import files the frontend already read.
pub async fn import_folder(
    state: &AppState,
    request: ImportFolderRequest,
) -> Result<ImportReport, String> {
    let files: Vec<MemoryFile> = request
        .files
        .into_iter()
        .map(|f| MemoryFile::new(f.path, f.content.into_bytes()))
        .collect();

    state
        .importer
        .import_folder(&files, &request.binary_files, &request.folder_name)
        .await
        .map_err(|e| format!("Import failed: {e}"))
}

/// Import a folder straight from the local disk.
pub async fn import_directory(state: &AppState, path: String) -> Result<ImportReport, String> {
    let dir_path = if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .ok_or("Cannot resolve home directory")?
            .join(rest)
    } else {
        PathBuf::from(&path)
    };

    let collected = tokio::task::spawn_blocking(move || collect_folder(&dir_path))
        .await
        .map_err(|e| format!("Folder scan task failed: {e}"))?
        .map_err(|e| format!("Failed to scan folder: {e}"))?;

    tracing::info!(
        path = %path,
        text_files = collected.files.len(),
        binary_files = collected.binary_files.len(),
        "import_directory"
    );

    state
        .importer
        .import_folder(
            &collected.files,
            &collected.binary_files,
            &collected.folder_name,
        )
        .await
        .map_err(|e| format!("Import failed: {e}"))
}

//! Collecting an on-disk folder into file handles for import.

use std::io::Read;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use super::errors::ImportError;
use super::source::{strip_root_segment, DiskFile};

/// Directory names never descended into.
const IGNORED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "dist",
    "build",
    "target",
    ".next",
    ".cache",
    "coverage",
    ".vscode",
    ".idea",
];

/// File names never imported.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Bytes inspected when sniffing for binary content.
const BINARY_SNIFF_LEN: usize = 8192;

/// A folder ready to hand to `FolderImporter::import_folder`.
#[derive(Debug, Clone)]
pub struct CollectedFolder {
    pub folder_name: String,
    /// Text files, with paths prefixed by `folder_name`.
    pub files: Vec<DiskFile>,
    /// Binary files, with paths relative to the folder.
    pub binary_files: Vec<String>,
}

/// Walk `root`, splitting its files into text and binary.
///
/// Entries are sorted by path so repeated imports see the same order.
/// Unreadable entries below the root are skipped; a file whose content cannot
/// be sniffed is still handed to the importer so its read policy decides.
pub fn collect_folder(root: &Path) -> Result<CollectedFolder, ImportError> {
    if !root.is_dir() {
        return Err(ImportError::FolderNotFound {
            path: root.display().to_string(),
        });
    }

    let folder_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "folder".to_string());

    let mut files = Vec::new();
    let mut binary_files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(ImportError::WalkFailed {
                    path: root.display().to_string(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if IGNORED_FILES.contains(&name.as_ref()) {
            continue;
        }

        let relative = relative_path(root, entry.path(), &folder_name);
        match sniff(entry.path()) {
            ContentKind::Binary => binary_files.push(strip_root_segment(&relative).to_string()),
            ContentKind::Text => files.push(DiskFile {
                relative_path: relative,
                absolute_path: entry.into_path(),
            }),
        }
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    binary_files.sort();

    tracing::debug!(
        root = %root.display(),
        text_files = files.len(),
        binary_files = binary_files.len(),
        "collected folder"
    );

    Ok(CollectedFolder {
        folder_name,
        files,
        binary_files,
    })
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && IGNORED_DIRS.contains(&entry.file_name().to_string_lossy().as_ref())
}

/// `folder/sub/file.ext` with `/` separators on every platform.
fn relative_path(root: &Path, path: &Path, folder_name: &str) -> String {
    let inner = path.strip_prefix(root).unwrap_or(path);
    let segments: Vec<String> = inner
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("{folder_name}/{}", segments.join("/"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentKind {
    Text,
    Binary,
}

/// A file is binary if its first bytes contain a NUL. Files that cannot be
/// opened count as text and fail later, at read time.
fn sniff(path: &Path) -> ContentKind {
    let mut head = Vec::with_capacity(BINARY_SNIFF_LEN);
    let read = std::fs::File::open(path)
        .and_then(|f| f.take(BINARY_SNIFF_LEN as u64).read_to_end(&mut head));
    match read {
        Ok(_) if head.contains(&0) => ContentKind::Binary,
        Ok(_) => ContentKind::Text,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not sniff file, treating as text");
            ContentKind::Text
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

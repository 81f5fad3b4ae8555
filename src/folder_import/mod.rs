//! Folder import — stages an imported folder and describes it in chat.
//!
//! Submodules:
//! - `pipeline`: `FolderImporter`, the read → detect → stage → summarize flow
//! - `source`: `FileSource` trait with in-memory and on-disk handles
//! - `walk`: Collects an on-disk folder into handles plus binary file names
//! - `summary`: Chat text for the import transcript
//! - `types`: Imported files, read policy, and the import report
//! - `errors`: Import error types

pub mod errors;
pub mod pipeline;
pub mod source;
pub mod summary;
pub mod types;
pub mod walk;

pub use errors::ImportError;
pub use pipeline::FolderImporter;
pub use source::{DiskFile, FileSource, MemoryFile};
pub use types::{
    FileOutcome, ImportReport, ImportedFile, ReadFailure, ReadFailureKind, ReadPolicy,
    StageResult,
};
pub use walk::{collect_folder, CollectedFolder};

//! FolderImporter — turns an imported folder into staged changes and chat messages.
//!
//! Steps:
//! 1. Read every file concurrently (bounded by `read_timeout_ms`).
//! 2. Strip the folder segment from each path.
//! 3. Ask the command detector for setup/start commands.
//! 4. Stage each file as a `create` change and accept it (user-initiated import).
//! 5. Show the workbench.
//! 6. Compose `[user, summary, (setup request), (commands)]`.
//!
//! Under `ReadPolicy::FailFast` a single failed read aborts the import before
//! anything is staged.

use std::sync::Arc;
use std::time::Duration;

use futures::future::{join_all, try_join_all};

use super::errors::ImportError;
use super::source::{strip_root_segment, FileSource};
use super::summary;
use super::types::{
    FileOutcome, ImportReport, ImportedFile, ReadFailure, ReadFailureKind, ReadPolicy,
    StageResult,
};
use crate::chat::{ChatMessage, Role};
use crate::config::ImportConfig;
use crate::ids::{generate_id, import_action_id};
use crate::project_commands::{create_commands_message, CommandDetector, ProjectCommands};
use crate::staging::{ChangeStatus, ChangeType, NewStagedChange, StagingStore};
use crate::workbench::WorkbenchState;

pub struct FolderImporter {
    staging: Arc<StagingStore>,
    workbench: Arc<WorkbenchState>,
    detector: Arc<dyn CommandDetector>,
    config: ImportConfig,
}

impl FolderImporter {
    pub fn new(
        staging: Arc<StagingStore>,
        workbench: Arc<WorkbenchState>,
        detector: Arc<dyn CommandDetector>,
        config: ImportConfig,
    ) -> Self {
        Self {
            staging,
            workbench,
            detector,
            config,
        }
    }

    /// Import a folder.
    ///
    /// `binary_files` lists files the caller already excluded from `files`
    /// because they are not text; they only appear in the summary.
    pub async fn import_folder<F: FileSource>(
        &self,
        files: &[F],
        binary_files: &[String],
        folder_name: &str,
    ) -> Result<ImportReport, ImportError> {
        tracing::info!(
            folder = folder_name,
            files = files.len(),
            binary_files = binary_files.len(),
            policy = ?self.config.read_policy,
            "importing folder"
        );

        let (imported, read_failures) = self.read_all(files).await?;

        let commands = self.detect_commands(&imported).await;
        let commands_message = commands.as_ref().and_then(create_commands_message);

        let message_id = generate_id();
        let mut outcomes: Vec<FileOutcome> = Vec::with_capacity(imported.len());
        for file in &imported {
            let result = self.stage_and_accept(file, &message_id);
            if let StageResult::Accepted { change_id } = &result {
                self.mark_superseded(&mut outcomes, &file.path, change_id);
            }
            outcomes.push(FileOutcome {
                path: file.path.clone(),
                result,
            });
        }

        self.workbench.show();

        let summary_text =
            summary::import_summary(folder_name, &outcomes, binary_files, &read_failures);

        let mut messages = vec![
            ChatMessage::user(summary::import_request(folder_name)),
            ChatMessage::with_id(message_id.clone(), Role::Assistant, summary_text),
        ];
        if let Some(commands_message) = commands_message {
            messages.push(ChatMessage::user(summary::SETUP_REQUEST));
            messages.push(commands_message);
        }

        let report = ImportReport {
            message_id,
            messages,
            outcomes,
            read_failures,
        };

        tracing::info!(
            folder = folder_name,
            message_id = %report.message_id,
            accepted = report.accepted_count(),
            staging_failures = report.staging_failures().len(),
            read_failures = report.read_failures.len(),
            messages = report.messages.len(),
            "folder import complete"
        );

        Ok(report)
    }

    async fn read_all<F: FileSource>(
        &self,
        files: &[F],
    ) -> Result<(Vec<ImportedFile>, Vec<ReadFailure>), ImportError> {
        let timeout = self.config.read_timeout_ms.map(Duration::from_millis);

        match self.config.read_policy {
            ReadPolicy::FailFast => {
                let imported = try_join_all(files.iter().map(|f| read_one(f, timeout)))
                    .await
                    .map_err(|failure| {
                        tracing::warn!(
                            path = %failure.path,
                            reason = %failure.reason,
                            "file read failed, aborting import"
                        );
                        ImportError::from(failure)
                    })?;
                Ok((imported, Vec::new()))
            }
            ReadPolicy::CollectPartial => {
                let results = join_all(files.iter().map(|f| read_one(f, timeout))).await;
                let mut imported = Vec::with_capacity(results.len());
                let mut failures = Vec::new();
                for result in results {
                    match result {
                        Ok(file) => imported.push(file),
                        Err(failure) => {
                            tracing::warn!(
                                path = %failure.path,
                                reason = %failure.reason,
                                "file read failed, skipping"
                            );
                            failures.push(failure);
                        }
                    }
                }
                Ok((imported, failures))
            }
        }
    }

    async fn detect_commands(&self, files: &[ImportedFile]) -> Option<ProjectCommands> {
        match self.detector.detect(files).await {
            Ok(Some(commands)) if !commands.is_empty() => {
                tracing::debug!(
                    project_type = ?commands.project_type,
                    setup = ?commands.setup_command,
                    start = ?commands.start_command,
                    "detected project commands"
                );
                Some(commands)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "command detection failed, skipping setup message");
                None
            }
        }
    }

    /// An earlier accepted file with the same path whose record the store
    /// dropped was replaced by `replaced_by`.
    fn mark_superseded(&self, outcomes: &mut [FileOutcome], path: &str, replaced_by: &str) {
        for outcome in outcomes.iter_mut().filter(|o| o.path == path) {
            let StageResult::Accepted { change_id } = &outcome.result else {
                continue;
            };
            let change_id = change_id.clone();
            if matches!(self.staging.get(&change_id), Ok(None)) {
                tracing::debug!(path, replaced = %change_id, replaced_by, "imported file superseded");
                outcome.result = StageResult::Superseded {
                    change_id,
                    replaced_by: replaced_by.to_string(),
                };
            }
        }
    }

    fn stage_and_accept(&self, file: &ImportedFile, message_id: &str) -> StageResult {
        let staged = self.staging.stage(NewStagedChange {
            file_path: file.path.clone(),
            change_type: ChangeType::Create,
            original_content: None,
            new_content: file.content.clone(),
            action_id: import_action_id(message_id, &file.path),
            message_id: message_id.to_string(),
            description: format!("Import: {}", file.path),
        });

        let change = match staged {
            Ok(change) => change,
            Err(e) => {
                tracing::warn!(path = %file.path, error = %e, "failed to stage imported file");
                return StageResult::Failed {
                    reason: e.to_string(),
                };
            }
        };

        if change.status != ChangeStatus::Pending {
            return StageResult::AlreadyResolved {
                change_id: change.id,
                status: change.status,
            };
        }

        match self.staging.accept(&change.id) {
            Ok(true) => StageResult::Accepted {
                change_id: change.id,
            },
            Ok(false) => {
                let status = self
                    .staging
                    .get(&change.id)
                    .ok()
                    .flatten()
                    .map(|c| c.status)
                    .unwrap_or(ChangeStatus::Rejected);
                StageResult::AlreadyResolved {
                    change_id: change.id,
                    status,
                }
            }
            Err(e) => {
                tracing::warn!(path = %file.path, error = %e, "failed to accept imported file");
                StageResult::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Read and decode one file. Never panics; every problem becomes a `ReadFailure`.
async fn read_one<F: FileSource>(
    file: &F,
    timeout: Option<Duration>,
) -> Result<ImportedFile, ReadFailure> {
    let source_path = file.relative_path();
    let failure = |kind: ReadFailureKind, reason: String| ReadFailure {
        path: source_path.to_string(),
        kind,
        reason,
    };

    let read = match timeout {
        Some(limit) => tokio::time::timeout(limit, file.read_bytes())
            .await
            .map_err(|_| {
                let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                failure(
                    ReadFailureKind::TimedOut { timeout_ms },
                    format!("timed out after {timeout_ms}ms"),
                )
            })?,
        None => file.read_bytes().await,
    };

    let bytes = read.map_err(|e| failure(ReadFailureKind::Io, e.to_string()))?;
    let content = String::from_utf8(bytes)
        .map_err(|e| failure(ReadFailureKind::InvalidUtf8, format!("not valid UTF-8: {e}")))?;

    Ok(ImportedFile {
        path: strip_root_segment(source_path).to_string(),
        content,
    })
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::folder_import::source::MemoryFile;
    use crate::project_commands::{DetectorError, ManifestDetector, ProjectType};
    use crate::staging::{AcceptPolicy, DuplicatePathPolicy};

    /// Detector that never finds anything.
    struct NoCommands;

    #[async_trait]
    impl CommandDetector for NoCommands {
        async fn detect(
            &self,
            _files: &[ImportedFile],
        ) -> Result<Option<ProjectCommands>, DetectorError> {
            Ok(None)
        }
    }

    /// Detector that always fails.
    struct BrokenDetector;

    #[async_trait]
    impl CommandDetector for BrokenDetector {
        async fn detect(
            &self,
            _files: &[ImportedFile],
        ) -> Result<Option<ProjectCommands>, DetectorError> {
            Err(DetectorError::InvalidManifest {
                path: "package.json".into(),
                reason: "boom".into(),
            })
        }
    }

    /// File whose read never completes.
    struct StalledFile;

    #[async_trait]
    impl FileSource for StalledFile {
        fn relative_path(&self) -> &str {
            "proj/stalled.txt"
        }

        async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
            futures::future::pending().await
        }
    }

    struct Harness {
        staging: Arc<StagingStore>,
        workbench: Arc<WorkbenchState>,
        importer: FolderImporter,
    }

    fn harness(detector: Arc<dyn CommandDetector>, config: ImportConfig) -> Harness {
        let staging = Arc::new(StagingStore::default());
        let workbench = Arc::new(WorkbenchState::new());
        let importer = FolderImporter::new(
            Arc::clone(&staging),
            Arc::clone(&workbench),
            detector,
            config,
        );
        Harness {
            staging,
            workbench,
            importer,
        }
    }

    fn text(path: &str, content: &str) -> MemoryFile {
        MemoryFile::new(path, content.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn test_single_file_scenario() {
        let h = harness(Arc::new(NoCommands), ImportConfig::default());
        let files = vec![text("a/x.txt", "hi")];

        let report = h.importer.import_folder(&files, &[], "proj").await.unwrap();

        assert_eq!(report.messages.len(), 2);
        assert_eq!(report.messages[0].role, Role::User);
        assert_eq!(report.messages[0].content, "Import the \"proj\" folder");
        assert_eq!(report.messages[1].role, Role::Assistant);
        assert_eq!(report.messages[1].id, report.message_id);
        assert_eq!(
            report.messages[1].content,
            "I've imported the contents of the \"proj\" folder.\n\n\
             **Files imported (1):**\n- `x.txt`\n\n\
             The files have been added to your project and are ready to use."
        );

        let changes = h.staging.list().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].file_path, "x.txt");
        assert_eq!(changes[0].status, ChangeStatus::Accepted);
        assert_eq!(changes[0].change_type, ChangeType::Create);
        assert_eq!(changes[0].new_content, "hi");
        assert!(changes[0].original_content.is_none());
        assert_eq!(changes[0].message_id, report.message_id);
        assert_eq!(
            changes[0].action_id,
            format!("import-{}-x.txt", report.message_id)
        );
        assert_eq!(changes[0].description, "Import: x.txt");
        assert!(h.workbench.is_visible());
    }

    #[tokio::test]
    async fn test_commands_add_two_messages() {
        let h = harness(Arc::new(ManifestDetector), ImportConfig::default());
        let files = vec![
            text("app/package.json", r#"{"scripts": {"dev": "vite"}}"#),
            text("app/src/main.ts", "console.log(1)"),
        ];

        let report = h.importer.import_folder(&files, &[], "app").await.unwrap();

        assert_eq!(report.messages.len(), 4);
        assert_eq!(report.messages[2].role, Role::User);
        assert_eq!(
            report.messages[2].content,
            "Setup the codebase and Start the application"
        );
        assert_eq!(report.messages[3].role, Role::Assistant);
        let cmds = report.messages[3].commands.as_ref().unwrap();
        assert_eq!(cmds.project_type, ProjectType::Node);
        assert_eq!(cmds.start_command.as_deref(), Some("npm run dev"));
        assert_eq!(h.staging.len().unwrap(), 2);
        assert_eq!(report.accepted_count(), 2);
    }

    #[tokio::test]
    async fn test_accepts_every_file() {
        let h = harness(Arc::new(NoCommands), ImportConfig::default());
        let files: Vec<MemoryFile> = (0..10)
            .map(|i| text(&format!("p/f{i}.txt"), &format!("{i}")))
            .collect();

        let report = h.importer.import_folder(&files, &[], "p").await.unwrap();
        let summary = &report.messages[1].content;
        assert_eq!(summary.matches("\n- `").count(), 10);

        let changes = h.staging.list().unwrap();
        assert_eq!(changes.len(), 10);
        assert!(changes
            .iter()
            .all(|c| c.status == ChangeStatus::Accepted && c.change_type == ChangeType::Create));
        // staging order follows input order
        assert_eq!(changes[3].file_path, "f3.txt");
    }

    #[tokio::test]
    async fn test_binary_files_listed() {
        let h = harness(Arc::new(NoCommands), ImportConfig::default());
        let files = vec![text("p/a.txt", "a")];
        let binaries = vec!["logo.png".to_string(), "icon.ico".to_string()];

        let report = h.importer.import_folder(&files, &binaries, "p").await.unwrap();
        let summary = &report.messages[1].content;
        assert!(summary.contains("Skipped 2 binary files:\n- logo.png\n- icon.ico"));
        // binaries are never staged
        assert_eq!(h.staging.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_repeat_import_same_content_new_identity() {
        let h = harness(Arc::new(NoCommands), ImportConfig::default());
        let files = vec![text("p/a.txt", "a"), text("p/b.txt", "b")];

        let first = h.importer.import_folder(&files, &[], "p").await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = h.importer.import_folder(&files, &[], "p").await.unwrap();

        for (a, b) in first.messages.iter().zip(second.messages.iter()) {
            assert_ne!(a.id, b.id);
            assert_ne!(a.created_at, b.created_at);
            assert_eq!(a.content, b.content);
        }
        assert_ne!(first.message_id, second.message_id);
        assert_eq!(h.staging.len().unwrap(), 4);
    }

    #[tokio::test]
    async fn test_fail_fast_stages_nothing() {
        let h = harness(Arc::new(NoCommands), ImportConfig::default());
        let files = vec![
            text("p/ok.txt", "fine"),
            MemoryFile::new("p/bad.txt", vec![0xffu8, 0xfe, 0xfd]),
        ];

        let err = h.importer.import_folder(&files, &[], "p").await.unwrap_err();
        assert!(matches!(err, ImportError::ReadFailed { ref path, .. } if path == "p/bad.txt"));
        assert!(h.staging.is_empty().unwrap());
        assert!(!h.workbench.is_visible());
    }

    #[tokio::test]
    async fn test_collect_partial_reports_failures() {
        let config = ImportConfig {
            read_policy: ReadPolicy::CollectPartial,
            ..ImportConfig::default()
        };
        let h = harness(Arc::new(NoCommands), config);
        let files = vec![
            text("p/ok.txt", "fine"),
            MemoryFile::new("p/bad.txt", vec![0xffu8]),
        ];

        let report = h.importer.import_folder(&files, &[], "p").await.unwrap();
        assert_eq!(report.read_failures.len(), 1);
        assert_eq!(report.read_failures[0].kind, ReadFailureKind::InvalidUtf8);
        assert_eq!(report.outcomes.len(), 1);
        assert!(!report.is_complete());
        assert!(report.messages[1]
            .content
            .contains("**Failed to read (1):**\n- `p/bad.txt`"));
        assert_eq!(h.staging.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_read_timeout() {
        let config = ImportConfig {
            read_timeout_ms: Some(20),
            ..ImportConfig::default()
        };
        let h = harness(Arc::new(NoCommands), config);

        let err = h
            .importer
            .import_folder(&[StalledFile], &[], "proj")
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::ReadTimeout { timeout_ms: 20, .. }));
    }

    #[tokio::test]
    async fn test_duplicate_paths_surface_as_staging_failures() {
        let h = harness(Arc::new(NoCommands), ImportConfig::default());
        // different folder segments collapse to the same project path
        let files = vec![text("p/a.txt", "one"), text("q/a.txt", "two")];

        let report = h.importer.import_folder(&files, &[], "p").await.unwrap();
        assert_eq!(report.accepted_count(), 1);
        assert_eq!(report.staging_failures().len(), 1);
        assert!(report.messages[1].content.contains("**Files imported (1):**\n- `a.txt`\n\n"));
        assert!(report.messages[1].content.contains("**Failed to stage (1):**"));
        assert_eq!(h.staging.len().unwrap(), 1);
    }

    fn with_duplicate_policy(policy: DuplicatePathPolicy) -> Harness {
        let staging = Arc::new(StagingStore::new(AcceptPolicy::Ignore, policy));
        let workbench = Arc::new(WorkbenchState::new());
        let importer = FolderImporter::new(
            Arc::clone(&staging),
            Arc::clone(&workbench),
            Arc::new(NoCommands),
            ImportConfig::default(),
        );
        Harness {
            staging,
            workbench,
            importer,
        }
    }

    #[tokio::test]
    async fn test_keep_first_reports_already_resolved() {
        let h = with_duplicate_policy(DuplicatePathPolicy::KeepFirst);
        let files = vec![text("p/a.txt", "one"), text("q/a.txt", "two")];

        let report = h.importer.import_folder(&files, &[], "p").await.unwrap();
        assert!(matches!(
            report.outcomes[1].result,
            StageResult::AlreadyResolved {
                status: ChangeStatus::Accepted,
                ..
            }
        ));
        assert_eq!(report.accepted_count(), 1);
        assert!(!report.is_complete());
        assert_eq!(h.staging.len().unwrap(), 1);
        assert_eq!(h.staging.list().unwrap()[0].new_content, "one");

        let summary = &report.messages[1].content;
        assert!(summary.contains("**Files imported (1):**\n- `a.txt`\n\n"));
        assert!(summary.contains("**Kept earlier version (1):**\n- `a.txt`"));
    }

    #[tokio::test]
    async fn test_replace_supersedes_earlier_outcome() {
        let h = with_duplicate_policy(DuplicatePathPolicy::Replace);
        let files = vec![text("p/a.txt", "one"), text("q/a.txt", "two")];

        let report = h.importer.import_folder(&files, &[], "p").await.unwrap();

        let changes = h.staging.list().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].new_content, "two");
        assert_eq!(changes[0].status, ChangeStatus::Accepted);

        assert_eq!(report.accepted_count(), 1);
        assert!(!report.is_complete());
        match (&report.outcomes[0].result, &report.outcomes[1].result) {
            (
                StageResult::Superseded {
                    change_id,
                    replaced_by,
                },
                StageResult::Accepted { change_id: live },
            ) => {
                assert!(h.staging.get(change_id).unwrap().is_none());
                assert_eq!(replaced_by, live);
                assert_eq!(live, &changes[0].id);
            }
            other => panic!("unexpected outcomes: {other:?}"),
        }

        let summary = &report.messages[1].content;
        assert!(summary.contains("**Files imported (1):**\n- `a.txt`\n\n"));
        assert!(summary.contains("**Replaced by a later file (1):**\n- `a.txt`"));
    }

    #[tokio::test]
    async fn test_detector_failure_means_no_commands() {
        let h = harness(Arc::new(BrokenDetector), ImportConfig::default());
        let files = vec![text("p/package.json", "{}")];

        let report = h.importer.import_folder(&files, &[], "p").await.unwrap();
        assert_eq!(report.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_folder() {
        let h = harness(Arc::new(ManifestDetector), ImportConfig::default());
        let files: Vec<MemoryFile> = Vec::new();

        let report = h.importer.import_folder(&files, &[], "empty").await.unwrap();
        assert_eq!(report.messages.len(), 2);
        assert!(report.messages[1].content.contains("**Files imported (0):**"));
        assert!(h.staging.is_empty().unwrap());
        assert!(h.workbench.is_visible());
    }
}

//! StagingStore — session-scoped table of pending file changes.
//!
//! Every operation runs under a single lock, so a status transition is an
//! atomic compare-and-set on `status`: two concurrent `accept` calls on the
//! same change can never both succeed.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use sha2::{Digest, Sha256};

use super::errors::StagingError;
use super::types::{
    AcceptPolicy, ChangeStatus, DuplicatePathPolicy, NewStagedChange, StagedChange,
};
use crate::ids::generate_id;

#[derive(Default)]
struct Inner {
    /// Change id → record.
    changes: HashMap<String, StagedChange>,
    /// Change ids in staging order.
    order: Vec<String>,
    /// Action id → change id.
    actions: HashMap<String, String>,
    /// (message id, file path) → change id.
    paths: HashMap<(String, String), String>,
}

impl Inner {
    fn remove(&mut self, id: &str) -> Option<StagedChange> {
        let removed = self.changes.remove(id)?;
        self.order.retain(|existing| existing != id);
        self.actions.remove(&removed.action_id);
        self.paths
            .remove(&(removed.message_id.clone(), removed.file_path.clone()));
        Some(removed)
    }

    fn find_path(&self, message_id: &str, file_path: &str) -> Option<&StagedChange> {
        let id = self
            .paths
            .get(&(message_id.to_string(), file_path.to_string()))?;
        self.changes.get(id)
    }
}

/// Owns all staged changes for one workbench session.
pub struct StagingStore {
    inner: Mutex<Inner>,
    accept_policy: AcceptPolicy,
    duplicate_paths: DuplicatePathPolicy,
}

impl Default for StagingStore {
    fn default() -> Self {
        Self::new(AcceptPolicy::default(), DuplicatePathPolicy::default())
    }
}

impl StagingStore {
    pub fn new(accept_policy: AcceptPolicy, duplicate_paths: DuplicatePathPolicy) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            accept_policy,
            duplicate_paths,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StagingError> {
        self.inner.lock().map_err(|e| StagingError::LockPoisoned {
            reason: e.to_string(),
        })
    }

    /// Stage a change. The returned record starts out `Pending`, except when
    /// `DuplicatePathPolicy::KeepFirst` hands back an earlier record as-is.
    pub fn stage(&self, input: NewStagedChange) -> Result<StagedChange, StagingError> {
        if input.file_path.trim().is_empty() {
            return Err(StagingError::InvalidInput {
                reason: "file path is empty".into(),
            });
        }
        if input.action_id.is_empty() {
            return Err(StagingError::InvalidInput {
                reason: format!("missing action id for '{}'", input.file_path),
            });
        }

        let mut inner = self.lock()?;

        if let Some(existing) = inner.find_path(&input.message_id, &input.file_path) {
            match self.duplicate_paths {
                DuplicatePathPolicy::Reject => {
                    return Err(StagingError::DuplicatePath {
                        file_path: input.file_path,
                        message_id: input.message_id,
                    });
                }
                DuplicatePathPolicy::KeepFirst => {
                    tracing::debug!(
                        path = %existing.file_path,
                        change_id = %existing.id,
                        "duplicate path in batch, keeping first"
                    );
                    return Ok(existing.clone());
                }
                DuplicatePathPolicy::Replace => {
                    let old_id = existing.id.clone();
                    if let Some(old) = inner.remove(&old_id) {
                        tracing::debug!(
                            path = %old.file_path,
                            replaced = %old.id,
                            content_changed = old.content_digest != digest(&input.new_content),
                            "duplicate path in batch, replacing"
                        );
                    }
                }
            }
        }

        if inner.actions.contains_key(&input.action_id) {
            return Err(StagingError::DuplicateAction {
                action_id: input.action_id,
            });
        }

        let change = StagedChange {
            id: generate_id(),
            content_digest: digest(&input.new_content),
            file_path: input.file_path,
            change_type: input.change_type,
            original_content: input.original_content,
            new_content: input.new_content,
            status: ChangeStatus::Pending,
            action_id: input.action_id,
            message_id: input.message_id,
            description: input.description,
            created_at: Utc::now(),
            resolved_at: None,
        };

        inner
            .actions
            .insert(change.action_id.clone(), change.id.clone());
        inner.paths.insert(
            (change.message_id.clone(), change.file_path.clone()),
            change.id.clone(),
        );
        inner.order.push(change.id.clone());
        inner.changes.insert(change.id.clone(), change.clone());

        tracing::debug!(
            change_id = %change.id,
            path = %change.file_path,
            change_type = ?change.change_type,
            "change staged"
        );
        Ok(change)
    }

    /// Accept a pending change. Returns `true` if this call performed the
    /// transition.
    pub fn accept(&self, id: &str) -> Result<bool, StagingError> {
        self.resolve(id, ChangeStatus::Accepted)
    }

    /// Reject a pending change. Returns `true` if this call performed the
    /// transition.
    pub fn reject(&self, id: &str) -> Result<bool, StagingError> {
        self.resolve(id, ChangeStatus::Rejected)
    }

    fn resolve(&self, id: &str, target: ChangeStatus) -> Result<bool, StagingError> {
        let mut inner = self.lock()?;
        let change = inner
            .changes
            .get_mut(id)
            .ok_or_else(|| StagingError::NotFound { id: id.to_string() })?;

        if change.status != ChangeStatus::Pending {
            return match self.accept_policy {
                AcceptPolicy::Ignore => Ok(false),
                AcceptPolicy::Strict => Err(StagingError::NotPending {
                    id: id.to_string(),
                    status: change.status,
                }),
            };
        }

        change.status = target;
        change.resolved_at = Some(Utc::now());
        tracing::debug!(change_id = %id, status = ?target, "staged change resolved");
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Result<Option<StagedChange>, StagingError> {
        Ok(self.lock()?.changes.get(id).cloned())
    }

    /// All changes in staging order.
    pub fn list(&self) -> Result<Vec<StagedChange>, StagingError> {
        let inner = self.lock()?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.changes.get(id).cloned())
            .collect())
    }

    pub fn pending(&self) -> Result<Vec<StagedChange>, StagingError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| c.status == ChangeStatus::Pending)
            .collect())
    }

    /// Changes introduced by one chat message, in staging order.
    pub fn for_message(&self, message_id: &str) -> Result<Vec<StagedChange>, StagingError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| c.message_id == message_id)
            .collect())
    }

    pub fn len(&self) -> Result<usize, StagingError> {
        Ok(self.lock()?.changes.len())
    }

    pub fn is_empty(&self) -> Result<bool, StagingError> {
        Ok(self.len()? == 0)
    }

    /// Drop every change. Called when the session ends.
    pub fn clear(&self) -> Result<usize, StagingError> {
        let mut inner = self.lock()?;
        let count = inner.changes.len();
        *inner = Inner::default();
        Ok(count)
    }
}

fn digest(content: &str) -> String {
    let hash = Sha256::digest(content.as_bytes());
    format!("{hash:x}")
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::staging::types::ChangeType;

    fn create(message_id: &str, path: &str, content: &str) -> NewStagedChange {
        NewStagedChange {
            file_path: path.to_string(),
            change_type: ChangeType::Create,
            original_content: None,
            new_content: content.to_string(),
            action_id: crate::ids::import_action_id(message_id, path),
            message_id: message_id.to_string(),
            description: format!("Import: {path}"),
        }
    }

    #[test]
    fn test_stage_starts_pending() {
        let store = StagingStore::default();
        let change = store.stage(create("m1", "a.txt", "hi")).unwrap();
        assert_eq!(change.status, ChangeStatus::Pending);
        assert_eq!(change.change_type, ChangeType::Create);
        assert!(change.original_content.is_none());
        assert!(change.resolved_at.is_none());
        // sha256("hi")
        assert_eq!(
            change.content_digest,
            "8f434346648f6b96df89dda901c5176b10a6d83961dd3c1ac88b59b2dc327aa4"
        );
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_accept_once() {
        let store = StagingStore::default();
        let change = store.stage(create("m1", "a.txt", "hi")).unwrap();

        assert!(store.accept(&change.id).unwrap());
        assert!(!store.accept(&change.id).unwrap(), "second accept is a no-op");

        let stored = store.get(&change.id).unwrap().unwrap();
        assert_eq!(stored.status, ChangeStatus::Accepted);
        assert!(stored.resolved_at.is_some());
    }

    #[test]
    fn test_strict_policy_rejects_second_accept() {
        let store = StagingStore::new(AcceptPolicy::Strict, DuplicatePathPolicy::Reject);
        let change = store.stage(create("m1", "a.txt", "hi")).unwrap();
        store.reject(&change.id).unwrap();

        let err = store.accept(&change.id).unwrap_err();
        assert!(matches!(
            err,
            StagingError::NotPending {
                status: ChangeStatus::Rejected,
                ..
            }
        ));
    }

    #[test]
    fn test_accept_unknown_id() {
        let store = StagingStore::default();
        assert!(matches!(
            store.accept("missing"),
            Err(StagingError::NotFound { .. })
        ));
    }

    #[test]
    fn test_empty_path_is_invalid() {
        let store = StagingStore::default();
        let err = store.stage(create("m1", "  ", "x")).unwrap_err();
        assert!(matches!(err, StagingError::InvalidInput { .. }));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_duplicate_action_id_rejected() {
        let store = StagingStore::default();
        store.stage(create("m1", "a.txt", "one")).unwrap();

        let mut dup = create("m2", "b.txt", "two");
        dup.action_id = crate::ids::import_action_id("m1", "a.txt");
        let err = store.stage(dup).unwrap_err();
        assert!(matches!(err, StagingError::DuplicateAction { .. }));
    }

    #[test]
    fn test_duplicate_path_reject() {
        let store = StagingStore::default();
        store.stage(create("m1", "a.txt", "one")).unwrap();
        let err = store.stage(create("m1", "a.txt", "two")).unwrap_err();
        assert!(matches!(err, StagingError::DuplicatePath { .. }));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_path_replace() {
        let store = StagingStore::new(AcceptPolicy::Ignore, DuplicatePathPolicy::Replace);
        let first = store.stage(create("m1", "a.txt", "one")).unwrap();
        let second = store.stage(create("m1", "a.txt", "two")).unwrap();

        assert_ne!(first.id, second.id);
        assert!(store.get(&first.id).unwrap().is_none());
        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].new_content, "two");
    }

    #[test]
    fn test_replace_tracks_latest_record() {
        let store = StagingStore::new(AcceptPolicy::Ignore, DuplicatePathPolicy::Replace);
        store.stage(create("m1", "a.txt", "one")).unwrap();
        let second = store.stage(create("m1", "a.txt", "two")).unwrap();
        let mut third = create("m1", "a.txt", "three");
        third.action_id = "import-m1-a.txt-3".into();
        let third = store.stage(third).unwrap();

        assert!(store.get(&second.id).unwrap().is_none());
        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, third.id);
        assert_eq!(all[0].new_content, "three");
    }

    #[test]
    fn test_many_paths_in_one_batch() {
        let store = StagingStore::default();
        for i in 0..2_000 {
            store
                .stage(create("m1", &format!("src/f{i}.rs"), "x"))
                .unwrap();
        }
        assert_eq!(store.len().unwrap(), 2_000);
        assert!(matches!(
            store.stage(create("m1", "src/f1999.rs", "y")),
            Err(StagingError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn test_duplicate_path_keep_first() {
        let store = StagingStore::new(AcceptPolicy::Ignore, DuplicatePathPolicy::KeepFirst);
        let first = store.stage(create("m1", "a.txt", "one")).unwrap();
        store.accept(&first.id).unwrap();

        let again = store.stage(create("m1", "a.txt", "two")).unwrap();
        assert_eq!(again.id, first.id);
        assert_eq!(again.status, ChangeStatus::Accepted);
        assert_eq!(again.new_content, "one");
    }

    #[test]
    fn test_same_path_different_messages_allowed() {
        let store = StagingStore::default();
        store.stage(create("m1", "a.txt", "one")).unwrap();
        store.stage(create("m2", "a.txt", "two")).unwrap();
        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(store.for_message("m2").unwrap().len(), 1);
    }

    #[test]
    fn test_list_preserves_order_and_pending_filter() {
        let store = StagingStore::default();
        let a = store.stage(create("m1", "a.txt", "a")).unwrap();
        store.stage(create("m1", "b.txt", "b")).unwrap();
        store.stage(create("m1", "c.txt", "c")).unwrap();
        store.accept(&a.id).unwrap();

        let paths: Vec<String> = store.list().unwrap().into_iter().map(|c| c.file_path).collect();
        assert_eq!(paths, vec!["a.txt", "b.txt", "c.txt"]);
        assert_eq!(store.pending().unwrap().len(), 2);
    }

    #[test]
    fn test_clear() {
        let store = StagingStore::default();
        store.stage(create("m1", "a.txt", "a")).unwrap();
        store.stage(create("m1", "b.txt", "b")).unwrap();
        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.is_empty().unwrap());
        // action ids are free again after a clear
        store.stage(create("m1", "a.txt", "a")).unwrap();
    }

    #[test]
    fn test_concurrent_accept_single_winner() {
        let store = Arc::new(StagingStore::default());
        let change = store.stage(create("m1", "a.txt", "a")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let id = change.id.clone();
                std::thread::spawn(move || store.accept(&id).unwrap())
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);
    }
}

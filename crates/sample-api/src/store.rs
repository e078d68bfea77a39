//! In-memory task store with ordered keyset pagination.
//!
//! Tasks live in a `BTreeMap` keyed by identifier, so listing order is
//! lexicographic id order and a page cursor only needs to remember the last
//! id already handed out. The map sits behind a single `parking_lot::RwLock`;
//! every operation locks for the duration of one call and never across an
//! await point.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ops::Bound;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Task;

/// Errors surfaced by [`TaskStore`] operations.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// A task with the same id already exists.
    #[error("task {0} already exists")]
    DuplicateId(String),

    /// No task with the given id.
    #[error("task {0} not found")]
    NotFound(String),

    /// The expected version did not match the stored version.
    #[error("version mismatch for {id}: requested {requested}, stored {actual}")]
    VersionMismatch {
        /// Task identifier.
        id: String,
        /// Version the caller expected.
        requested: u64,
        /// Version actually stored.
        actual: u64,
    },
}

/// Thread-safe in-memory task collection.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: RwLock<BTreeMap<String, Task>>,
}

impl TaskStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new task, rejecting duplicate identifiers.
    pub fn insert(&self, task: Task) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write();
        if tasks.contains_key(&task.id) {
            return Err(StoreError::DuplicateId(task.id));
        }
        tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    /// Returns a copy of the task with the given id.
    pub fn get(&self, id: &str) -> Result<Task, StoreError> {
        self.tasks
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Applies `apply` to the stored task and bumps its version.
    ///
    /// When `expected_version` is given, the stored version must match before
    /// any mutation happens.
    pub fn update_with(
        &self,
        id: &str,
        expected_version: Option<u64>,
        apply: impl FnOnce(&mut Task),
    ) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write();
        let task = tasks
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(requested) = expected_version {
            if task.version != requested {
                return Err(StoreError::VersionMismatch {
                    id: id.to_string(),
                    requested,
                    actual: task.version,
                });
            }
        }

        apply(task);
        task.version += 1;
        Ok(task.clone())
    }

    /// Inserts or replaces, reporting whether a new task was created.
    ///
    /// An existing task keeps its identity and gets a version bump; a new one
    /// starts at version 0 regardless of the version on `task`.
    pub fn upsert(&self, task: Task) -> (Task, bool) {
        let mut tasks = self.tasks.write();
        match tasks.entry(task.id.clone()) {
            Entry::Occupied(mut entry) => {
                let current = entry.get_mut();
                current.title = task.title;
                current.description = task.description;
                current.priority = task.priority;
                current.version += 1;
                (current.clone(), false)
            }
            Entry::Vacant(entry) => {
                let task = Task { version: 0, ..task };
                entry.insert(task.clone());
                (task, true)
            }
        }
    }

    /// Removes and returns the task with the given id.
    pub fn remove(&self, id: &str) -> Result<Task, StoreError> {
        self.tasks
            .write()
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Removes every task.
    pub fn clear(&self) {
        self.tasks.write().clear();
    }

    /// Number of stored tasks.
    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    /// Whether the store holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }

    /// Returns up to `size` tasks ordered by id, starting after `after`.
    ///
    /// Reads one element past the page boundary to decide whether a further
    /// page exists. The second component is the id to resume from, `None` on
    /// the final page.
    pub fn page(&self, after: Option<&str>, size: usize) -> (Vec<Task>, Option<String>) {
        let tasks = self.tasks.read();
        let range: Box<dyn Iterator<Item = &Task>> = match after {
            Some(after) => Box::new(
                tasks
                    .range::<str, _>((Bound::Excluded(after), Bound::Unbounded))
                    .map(|(_, task)| task),
            ),
            None => Box::new(tasks.values()),
        };

        let mut elements: Vec<Task> = range.take(size + 1).cloned().collect();
        let next = if elements.len() > size {
            elements.truncate(size);
            elements.last().map(|task| task.id.clone())
        } else {
            None
        };
        (elements, next)
    }
}

/// Version tag accepted by [`PageCursor::decode`].
const CURSOR_VERSION: u8 = 1;

/// Errors from decoding a pagination cursor.
#[derive(Debug, Error)]
pub enum CursorError {
    /// Not valid unpadded base64url.
    #[error("cursor is not base64url: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// Decoded bytes are not the expected JSON document.
    #[error("cursor payload is malformed: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// Cursor written by an incompatible format version.
    #[error("unsupported cursor version {0}")]
    UnsupportedVersion(u8),
}

/// Opaque list cursor carried in the `next` query parameter.
///
/// Encodes the id of the last element already returned, wrapped in a
/// versioned JSON document so the format can change without stale cursors
/// decoding into nonsense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageCursor {
    v: u8,
    last_id: String,
}

impl PageCursor {
    /// Creates a cursor resuming after `last_id`.
    pub fn new(last_id: impl Into<String>) -> Self {
        Self {
            v: CURSOR_VERSION,
            last_id: last_id.into(),
        }
    }

    /// The id to resume listing after.
    pub fn last_id(&self) -> &str {
        &self.last_id
    }

    /// Encodes the cursor for the wire.
    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).expect("cursor serializes to JSON");
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decodes a wire cursor.
    pub fn decode(raw: &str) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD.decode(raw)?;
        let cursor: Self = serde_json::from_slice(&bytes)?;
        if cursor.v != CURSOR_VERSION {
            return Err(CursorError::UnsupportedVersion(cursor.v));
        }
        Ok(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> Task {
        Task::new(id, format!("Task {id}"), None, 5)
    }

    #[test]
    fn test_insert_and_get() {
        let store = TaskStore::new();
        store.insert(task("alpha")).expect("insert");

        let found = store.get("alpha").expect("get");
        assert_eq!(found.title, "Task alpha");
        assert_eq!(found.version, 0);
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let store = TaskStore::new();
        store.insert(task("alpha")).expect("insert");

        let err = store.insert(task("alpha")).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("alpha".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_absent() {
        let store = TaskStore::new();
        assert_eq!(
            store.get("ghost").unwrap_err(),
            StoreError::NotFound("ghost".to_string())
        );
    }

    #[test]
    fn test_update_bumps_version() {
        let store = TaskStore::new();
        store.insert(task("alpha")).expect("insert");

        let updated = store
            .update_with("alpha", None, |t| t.title = "Renamed".to_string())
            .expect("update");
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.version, 1);

        let updated = store
            .update_with("alpha", Some(1), |t| t.priority = 2)
            .expect("conditional update");
        assert_eq!(updated.version, 2);
    }

    #[test]
    fn test_update_version_mismatch_leaves_task_untouched() {
        let store = TaskStore::new();
        store.insert(task("alpha")).expect("insert");

        let err = store
            .update_with("alpha", Some(3), |t| t.title = "Never".to_string())
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::VersionMismatch {
                id: "alpha".to_string(),
                requested: 3,
                actual: 0,
            }
        );

        let stored = store.get("alpha").expect("get");
        assert_eq!(stored.title, "Task alpha");
        assert_eq!(stored.version, 0);
    }

    #[test]
    fn test_update_absent() {
        let store = TaskStore::new();
        let err = store.update_with("ghost", None, |_| {}).unwrap_err();
        assert_eq!(err, StoreError::NotFound("ghost".to_string()));
    }

    #[test]
    fn test_upsert_creates_at_version_zero() {
        let store = TaskStore::new();
        let mut incoming = task("alpha");
        incoming.version = 42;

        let (stored, created) = store.upsert(incoming);
        assert!(created);
        assert_eq!(stored.version, 0);
    }

    #[test]
    fn test_upsert_replaces_and_bumps() {
        let store = TaskStore::new();
        store.insert(task("alpha")).expect("insert");

        let mut replacement = task("alpha");
        replacement.title = "Replaced".to_string();
        let (stored, created) = store.upsert(replacement);
        assert!(!created);
        assert_eq!(stored.title, "Replaced");
        assert_eq!(stored.version, 1);
    }

    #[test]
    fn test_remove() {
        let store = TaskStore::new();
        store.insert(task("alpha")).expect("insert");

        let removed = store.remove("alpha").expect("remove");
        assert_eq!(removed.id, "alpha");
        assert!(store.is_empty());
        assert_eq!(
            store.remove("alpha").unwrap_err(),
            StoreError::NotFound("alpha".to_string())
        );
    }

    #[test]
    fn test_clear() {
        let store = TaskStore::new();
        store.insert(task("alpha")).expect("insert");
        store.insert(task("beta")).expect("insert");

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_page_walks_in_id_order() {
        let store = TaskStore::new();
        for id in ["charlie", "alpha", "beta"] {
            store.insert(task(id)).expect("insert");
        }

        let (first, next) = store.page(None, 2);
        assert_eq!(
            first.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["alpha", "beta"]
        );
        assert_eq!(next.as_deref(), Some("beta"));

        let (second, next) = store.page(next.as_deref(), 2);
        assert_eq!(
            second.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["charlie"]
        );
        assert_eq!(next, None);
    }

    #[test]
    fn test_page_exact_boundary_has_no_cursor() {
        let store = TaskStore::new();
        store.insert(task("alpha")).expect("insert");
        store.insert(task("beta")).expect("insert");

        let (elements, next) = store.page(None, 2);
        assert_eq!(elements.len(), 2);
        assert_eq!(next, None);
    }

    #[test]
    fn test_page_empty_store() {
        let store = TaskStore::new();
        let (elements, next) = store.page(None, 10);
        assert!(elements.is_empty());
        assert_eq!(next, None);
    }

    #[test]
    fn test_cursor_round_trip() {
        let cursor = PageCursor::new("task-17");
        let decoded = PageCursor::decode(&cursor.encode()).expect("decode");
        assert_eq!(decoded, cursor);
        assert_eq!(decoded.last_id(), "task-17");
    }

    #[test]
    fn test_cursor_rejects_garbage() {
        assert!(matches!(
            PageCursor::decode("!!not-base64!!"),
            Err(CursorError::InvalidEncoding(_))
        ));

        let not_json = URL_SAFE_NO_PAD.encode(b"plain text");
        assert!(matches!(
            PageCursor::decode(&not_json),
            Err(CursorError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_cursor_rejects_unknown_version() {
        let raw = URL_SAFE_NO_PAD.encode(br#"{"v":9,"last_id":"task-17"}"#);
        assert!(matches!(
            PageCursor::decode(&raw),
            Err(CursorError::UnsupportedVersion(9))
        ));
    }
}

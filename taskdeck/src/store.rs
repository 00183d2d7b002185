//! In-memory task cache: the client's canonical copy of the collection.
//!
//! [`TaskCache`] keys every known task by id and keeps a separate
//! insertion-order id list for stable iteration. The two structures are kept
//! set-equal after every operation: no dangling id, no orphan entity. The
//! cache is replaced wholesale after a full reload and patched at a single
//! key for every other mutation.

use std::collections::HashMap;

use taskdeck_proto::task::{Task, TaskId};

/// Coarse load-status flag observed by presentation bindings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// No load attempted yet.
    #[default]
    Idle,
    /// A full reload is in flight.
    Loading,
    /// The last reload completed and the cache mirrors the server.
    Succeeded,
    /// The last reload failed; the cache holds whatever it held before.
    Failed,
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Id-keyed task cache with insertion-order iteration.
#[derive(Debug, Default)]
pub struct TaskCache {
    entities: HashMap<TaskId, Task>,
    ids: Vec<TaskId>,
    status: LoadStatus,
}

impl TaskCache {
    /// Creates an empty cache in the `Idle` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current load-status flag.
    #[must_use]
    pub const fn status(&self) -> LoadStatus {
        self.status
    }

    /// Transitions the load-status flag.
    ///
    /// Allowed transitions: `Idle -> Loading`, `Loading -> Succeeded`,
    /// `Loading -> Failed`, and any state back to `Loading` (a fresh load
    /// supersedes a prior terminal state). Disallowed transitions are
    /// ignored.
    pub fn set_status(&mut self, status: LoadStatus) {
        let allowed = matches!(
            (self.status, status),
            (_, LoadStatus::Loading) | (LoadStatus::Loading, LoadStatus::Succeeded | LoadStatus::Failed)
        );
        if allowed {
            self.status = status;
        } else {
            tracing::debug!(from = %self.status, to = %status, "ignoring load-status transition");
        }
    }

    /// Replaces the whole cache with the given tasks and marks the load
    /// succeeded. Prior contents are discarded regardless of overlap.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.entities.clear();
        self.ids.clear();
        for task in tasks {
            self.upsert(task);
        }
        // Wholesale replacement is its own transition: a reload can land on
        // any prior state without passing through Loading.
        self.status = LoadStatus::Succeeded;
        debug_assert!(self.invariant_holds());
    }

    /// Inserts or overwrites the entry at `task.id`. The id joins the
    /// iteration order only when it was not already present.
    pub fn upsert(&mut self, task: Task) {
        let id = task.id.clone();
        if self.entities.insert(id.clone(), task).is_none() {
            self.ids.push(id);
        }
        debug_assert!(self.invariant_holds());
    }

    /// Deletes the entry and its iteration-order slot. Absent ids are a
    /// no-op, not an error.
    pub fn remove(&mut self, id: &TaskId) {
        if self.entities.remove(id).is_some() {
            self.ids.retain(|stored| stored != id);
        }
        debug_assert!(self.invariant_holds());
    }

    /// Returns the cached task for an id, if present.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.entities.get(id)
    }

    /// Lazy projection of all tasks in insertion order.
    ///
    /// A live view over the current state, not a snapshot: restarting the
    /// iterator after a mutation reflects the mutation.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    /// Number of cached tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the cache holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Checks the id-list/entity-map set-equality invariant.
    #[must_use]
    pub fn invariant_holds(&self) -> bool {
        self.ids.len() == self.entities.len()
            && self.ids.iter().all(|id| self.entities.contains_key(id))
    }
}

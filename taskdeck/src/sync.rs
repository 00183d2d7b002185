//! Synchronization controller: orchestrates every user-initiated mutation
//! against the repository and keeps the [`TaskCache`] consistent.
//!
//! All mutation paths are pessimistic (the cache changes only after the
//! server confirms) except [`SyncController::change_status`], the
//! drag-and-drop path, which applies a speculative value first and reverts
//! it when the server rejects. Both disciplines share one helper,
//! [`SyncController::submit_update`], parameterized by speculation.
//!
//! One deliberate product behavior worth calling out:
//! [`SyncController::toggle_complete`] on a task whose `completed` flag is
//! already `true` DELETES the task -- completing is acknowledged by
//! archiving-through-deletion. This mirrors the upstream service's client
//! and is not an accident.
//!
//! In-flight mutations targeting the same task id are not fenced: whichever
//! resolution lands last overwrites the cache entry. Callers that need
//! stronger ordering must serialize their own calls.

use parking_lot::RwLock;

use taskdeck_proto::task::{DraftError, Task, TaskDraft, TaskId, TaskPatch, TaskStatus};

use crate::repository::{RepositoryError, TaskRepository};
use crate::store::{LoadStatus, TaskCache};

/// Errors surfaced to presentation bindings by controller operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// Local draft validation failed; no network call was made.
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// The operation referenced an id that is not in the local cache.
    #[error("task {0} is not in the local cache")]
    NotCached(TaskId),

    /// The repository call failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Orchestrates mutations between a [`TaskRepository`] and the [`TaskCache`].
///
/// Explicitly constructed with its repository injected -- there is no ambient
/// singleton. The controller is the cache's only writer; reads go through
/// [`SyncController::cache`]. Locks are never held across an await, so a
/// suspended network call never blocks other operations.
pub struct SyncController<R> {
    repo: R,
    cache: RwLock<TaskCache>,
    last_error: RwLock<Option<String>>,
}

impl<R: TaskRepository> SyncController<R> {
    /// Creates a controller with an empty cache.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            cache: RwLock::new(TaskCache::new()),
            last_error: RwLock::new(None),
        }
    }

    /// Read access to the cache. Hold the guard only briefly.
    pub fn cache(&self) -> parking_lot::RwLockReadGuard<'_, TaskCache> {
        self.cache.read()
    }

    /// The repository this controller was built with.
    pub const fn repository(&self) -> &R {
        &self.repo
    }

    /// Message of the most recent failed operation, for loading/error
    /// states in presentation bindings. Cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    /// Replaces the cache with the server's current collection.
    ///
    /// Sets the load status to `Loading` for the duration of the call;
    /// on failure the prior cache contents are kept and the status becomes
    /// `Failed` with the error message recorded.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Repository`] when the fetch fails.
    pub async fn load(&self) -> Result<(), SyncError> {
        self.cache.write().set_status(LoadStatus::Loading);
        match self.repo.list_all().await {
            Ok(tasks) => {
                tracing::info!(count = tasks.len(), "task collection loaded");
                self.cache.write().replace_all(tasks);
                self.clear_error();
                Ok(())
            }
            Err(err) => {
                self.cache.write().set_status(LoadStatus::Failed);
                Err(self.record(err.into()))
            }
        }
    }

    /// Creates a task from a draft.
    ///
    /// Validates locally first: an empty title fails synchronously without
    /// any network round trip. The created task enters the cache only after
    /// the server confirms (the cache never fabricates an id).
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Draft`] on local validation failure, or
    /// [`SyncError::Repository`] when the service rejects the draft.
    pub async fn create(&self, draft: TaskDraft) -> Result<Task, SyncError> {
        if let Err(err) = draft.validate() {
            return Err(self.record(err.into()));
        }
        match self.repo.create(&draft).await {
            Ok(task) => {
                tracing::info!(id = %task.id, "task created");
                self.cache.write().upsert(task.clone());
                self.clear_error();
                Ok(task)
            }
            Err(err) => Err(self.record(err.into())),
        }
    }

    /// Edits a cached task by merging a patch onto it (form-submit path).
    ///
    /// Pessimistic: the cache is only touched with the server-returned task,
    /// which is authoritative for normalized fields and `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotCached`] when the id is unknown locally, or
    /// [`SyncError::Repository`] when the update fails (cache unchanged).
    pub async fn edit(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, SyncError> {
        let Some(existing) = self.cache.read().get(id).cloned() else {
            return Err(self.record(SyncError::NotCached(id.clone())));
        };
        self.submit_update(existing.merged(patch), false).await
    }

    /// Deletes a task. Pessimistic: the entry disappears from the cache only
    /// after the server confirms, so a failed delete leaves it visible.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Repository`] when the delete fails.
    pub async fn remove(&self, id: &TaskId) -> Result<(), SyncError> {
        match self.repo.remove(id).await {
            Ok(()) => {
                tracing::info!(id = %id, "task deleted");
                self.cache.write().remove(id);
                self.clear_error();
                Ok(())
            }
            Err(err) => Err(self.record(err.into())),
        }
    }

    /// Toggles a task's completion flag (checkbox path).
    ///
    /// A task that is already `completed` is treated as acknowledged and
    /// DELETED -- delete-on-complete, see the module docs. Otherwise the flag
    /// is flipped to `true` pessimistically through the server.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotCached`] for unknown ids, otherwise whatever
    /// the underlying delete or update path returns.
    pub async fn toggle_complete(&self, id: &TaskId) -> Result<Option<Task>, SyncError> {
        let Some(task) = self.cache.read().get(id).cloned() else {
            return Err(self.record(SyncError::NotCached(id.clone())));
        };
        if task.completed {
            tracing::debug!(id = %id, "completed task acknowledged, deleting");
            self.remove(id).await?;
            return Ok(None);
        }
        self.submit_update(task.with_completed(true), false)
            .await
            .map(Some)
    }

    /// Moves a task to a new board column (drag-and-drop path).
    ///
    /// The one optimistic mutation: the new status is visible in the cache
    /// before the network call resolves. On success the server-confirmed
    /// task replaces the speculative value; on failure the pre-mutation
    /// snapshot is restored and the error surfaces.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotCached`] for unknown ids, or
    /// [`SyncError::Repository`] after the revert when the server rejects.
    pub async fn change_status(
        &self,
        id: &TaskId,
        new_status: TaskStatus,
    ) -> Result<Task, SyncError> {
        let Some(task) = self.cache.read().get(id).cloned() else {
            return Err(self.record(SyncError::NotCached(id.clone())));
        };
        tracing::debug!(id = %id, status = %new_status, "optimistic status change");
        self.submit_update(task.with_status(new_status), true).await
    }

    /// Shared mutation path: apply speculative patch (optional), call the
    /// repository, commit the server's task or revert the speculation.
    ///
    /// The speculative upsert is strictly ordered before the network call;
    /// reconciliation or rollback is strictly ordered after its resolution.
    async fn submit_update(&self, updated: Task, speculate: bool) -> Result<Task, SyncError> {
        let snapshot = self.cache.read().get(&updated.id).cloned();
        if speculate {
            self.cache.write().upsert(updated.clone());
        }

        match self.repo.update(&updated).await {
            Ok(confirmed) => {
                self.cache.write().upsert(confirmed.clone());
                self.clear_error();
                Ok(confirmed)
            }
            Err(err) => {
                if speculate {
                    let mut cache = self.cache.write();
                    match snapshot {
                        Some(original) => cache.upsert(original),
                        // Nothing to restore: the id was never cached.
                        None => cache.remove(&updated.id),
                    }
                    tracing::warn!(id = %updated.id, "optimistic update reverted");
                }
                Err(self.record(err.into()))
            }
        }
    }

    fn record(&self, err: SyncError) -> SyncError {
        tracing::warn!(error = %err, "sync operation failed");
        *self.last_error.write() = Some(err.to_string());
        err
    }

    fn clear_error(&self) {
        self.last_error.write().take();
    }
}

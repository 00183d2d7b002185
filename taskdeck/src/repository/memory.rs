//! In-process repository for testing and offline development.
//!
//! [`MemoryTaskRepository`] plays the server's role behind the
//! [`TaskRepository`] trait: it mints ids and timestamps, enforces the same
//! validation the service does, and resolves immediately. Failures can be
//! scripted with [`MemoryTaskRepository::fail_next`] so that rollback paths
//! are exercised deterministically.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::Mutex;

use taskdeck_proto::task::{Task, TaskDraft, TaskId};

use super::{RepositoryError, TaskRepository};

#[derive(Default)]
struct Inner {
    entities: HashMap<TaskId, Task>,
    order: Vec<TaskId>,
    next_id: u64,
    fail_next: Option<RepositoryError>,
    calls: u64,
}

impl Inner {
    /// Bumps the call counter and takes the scripted failure, if any.
    fn begin_call(&mut self) -> Result<(), RepositoryError> {
        self.calls += 1;
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn mint_id(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId::new(format!("mem-{:04}", self.next_id))
    }
}

/// Repository backed by an in-process map instead of a network service.
#[derive(Default)]
pub struct MemoryTaskRepository {
    inner: Mutex<Inner>,
}

impl MemoryTaskRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated from drafts, minting ids in order.
    #[must_use]
    pub fn seeded(drafts: Vec<TaskDraft>) -> Self {
        let repo = Self::new();
        {
            let mut inner = repo.inner.lock();
            for draft in drafts {
                let id = inner.mint_id();
                let now = Utc::now();
                let task = Task {
                    id: id.clone(),
                    title: draft.title,
                    description: draft.description,
                    status: draft.status,
                    priority: draft.priority,
                    due_date: draft.due_date,
                    completed: draft.completed,
                    created_at: now,
                    updated_at: now,
                };
                inner.entities.insert(id.clone(), task);
                inner.order.push(id);
            }
        }
        repo
    }

    /// Scripts the next repository call to fail with the given error.
    pub fn fail_next(&self, err: RepositoryError) {
        self.inner.lock().fail_next = Some(err);
    }

    /// Number of repository calls made so far (scripted failures included).
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.inner.lock().calls
    }

    /// Returns the stored task for an id, if present.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<Task> {
        self.inner.lock().entities.get(id).cloned()
    }
}

impl TaskRepository for MemoryTaskRepository {
    async fn list_all(&self) -> Result<Vec<Task>, RepositoryError> {
        let mut inner = self.inner.lock();
        inner.begin_call()?;
        let tasks = inner
            .order
            .iter()
            .filter_map(|id| inner.entities.get(id))
            .cloned()
            .collect();
        Ok(tasks)
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, RepositoryError> {
        let mut inner = self.inner.lock();
        inner.begin_call()?;
        draft
            .validate()
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;

        let id = inner.mint_id();
        let now = Utc::now();
        let task = Task {
            id: id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
            completed: draft.completed,
            created_at: now,
            updated_at: now,
        };
        inner.entities.insert(id.clone(), task.clone());
        inner.order.push(id);
        Ok(task)
    }

    async fn update(&self, task: &Task) -> Result<Task, RepositoryError> {
        let mut inner = self.inner.lock();
        inner.begin_call()?;
        task.to_draft()
            .validate()
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;

        let Some(stored) = inner.entities.get_mut(&task.id) else {
            return Err(RepositoryError::NotFound(task.id.clone()));
        };
        let updated = Task {
            created_at: stored.created_at,
            updated_at: Utc::now(),
            ..task.clone()
        };
        *stored = updated.clone();
        Ok(updated)
    }

    async fn remove(&self, id: &TaskId) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock();
        inner.begin_call()?;
        if inner.entities.remove(id).is_none() {
            return Err(RepositoryError::NotFound(id.clone()));
        }
        inner.order.retain(|stored| stored != id);
        Ok(())
    }
}

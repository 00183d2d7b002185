//! In-memory task collection backing the REST routes.
//!
//! The [`TaskStore`] keys tasks by their minted id and keeps a separate
//! insertion-order list so `GET /tasks` returns a stable order. Ids are
//! UUID v7 hex strings; `created_at`/`updated_at` are stamped here, making
//! the server authoritative for both.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use taskdeck_proto::task::{Task, TaskDraft, TaskId};

#[derive(Default)]
struct Inner {
    entities: HashMap<TaskId, Task>,
    order: Vec<TaskId>,
}

/// Thread-safe in-memory task collection.
#[derive(Default)]
pub struct TaskStore {
    inner: RwLock<Inner>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All tasks in insertion order.
    pub async fn list(&self) -> Vec<Task> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|id| inner.entities.get(id))
            .cloned()
            .collect()
    }

    /// Creates a task from a draft, minting the id and timestamps.
    pub async fn insert(&self, draft: TaskDraft) -> Task {
        let now = Utc::now();
        let task = Task {
            id: TaskId::new(Uuid::now_v7().simple().to_string()),
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
            completed: draft.completed,
            created_at: now,
            updated_at: now,
        };

        let mut inner = self.inner.write().await;
        inner.entities.insert(task.id.clone(), task.clone());
        inner.order.push(task.id.clone());
        task
    }

    /// Replaces the editable fields of an existing task. Returns the stored
    /// task, or `None` when the id is unknown.
    pub async fn update(&self, id: &TaskId, draft: TaskDraft) -> Option<Task> {
        let mut inner = self.inner.write().await;
        let task = inner.entities.get_mut(id)?;
        task.title = draft.title;
        task.description = draft.description;
        task.status = draft.status;
        task.priority = draft.priority;
        task.due_date = draft.due_date;
        task.completed = draft.completed;
        task.updated_at = Utc::now();
        Some(task.clone())
    }

    /// Deletes a task, returning it, or `None` when the id is unknown.
    pub async fn remove(&self, id: &TaskId) -> Option<Task> {
        let mut inner = self.inner.write().await;
        let task = inner.entities.remove(id)?;
        inner.order.retain(|stored| stored != id);
        Some(task)
    }
}

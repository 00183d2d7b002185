//! Board projection consumed by presentation bindings.
//!
//! Groups the cache's tasks into one column per [`TaskStatus`], preserving
//! cache insertion order within each column. A [`Board`] is a point-in-time
//! read model; rebuild it after mutations.

use taskdeck_proto::task::{Task, TaskStatus};

use crate::store::TaskCache;

/// One board column: a status and the tasks currently in it.
#[derive(Debug, Clone)]
pub struct BoardColumn {
    /// The status this column renders.
    pub status: TaskStatus,
    /// Tasks in cache insertion order.
    pub tasks: Vec<Task>,
}

/// All columns in board order (To Do, In Progress, Completed).
#[derive(Debug, Clone)]
pub struct Board {
    /// Columns, one per status, always all three present.
    pub columns: Vec<BoardColumn>,
}

impl Board {
    /// Builds the grouped projection from the cache's live state.
    #[must_use]
    pub fn from_cache(cache: &TaskCache) -> Self {
        let columns = TaskStatus::ALL
            .into_iter()
            .map(|status| BoardColumn {
                status,
                tasks: cache
                    .iter()
                    .filter(|task| task.status == status)
                    .cloned()
                    .collect(),
            })
            .collect();
        Self { columns }
    }

    /// The column for a given status. Every status has a column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Option<&BoardColumn> {
        self.columns.iter().find(|c| c.status == status)
    }
}

//! Repository abstraction over the remote task collection.
//!
//! Defines the [`TaskRepository`] trait that all repository implementations
//! must satisfy. Concrete implementations:
//! - [`http::HttpTaskRepository`] -- REST/JSON client against the task service
//! - [`memory::MemoryTaskRepository`] -- in-process repository for testing

pub mod http;
pub mod memory;

use taskdeck_proto::task::{Task, TaskDraft, TaskId};

/// Errors a repository operation can fail with.
///
/// Every failure is terminal for the operation that produced it: no
/// implementation retries, and the synchronization layer decides what to do
/// with the cache based on the variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The service rejected the submitted field values (HTTP 400).
    #[error("task service rejected the request: {0}")]
    Validation(String),

    /// The task id no longer exists on the service (HTTP 404).
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Network failure or an unexpected service response.
    #[error("task service unreachable: {0}")]
    Transport(String),
}

/// Async repository trait for the remote task collection.
///
/// One operation per verb, one network call per operation, no retries, no
/// side effects beyond the call itself. Implementations translate transport
/// results into typed [`Task`] records or a [`RepositoryError`].
pub trait TaskRepository: Send + Sync {
    /// Fetch every task in the collection, in the service's storage order.
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Task>, RepositoryError>> + Send;

    /// Create a task from a draft. The returned task carries the
    /// server-assigned id and timestamps.
    fn create(
        &self,
        draft: &TaskDraft,
    ) -> impl std::future::Future<Output = Result<Task, RepositoryError>> + Send;

    /// Replace the task's editable fields with the given task's values.
    /// Returns the task as the server stored it -- the server is
    /// authoritative for normalized fields and `updated_at`.
    fn update(
        &self,
        task: &Task,
    ) -> impl std::future::Future<Output = Result<Task, RepositoryError>> + Send;

    /// Delete the task with the given id.
    fn remove(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

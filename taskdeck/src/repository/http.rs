//! REST/JSON repository client for the remote task service.
//!
//! Maps the service's HTTP contract onto [`TaskRepository`]: 400 becomes
//! [`RepositoryError::Validation`], 404 becomes [`RepositoryError::NotFound`],
//! and everything else (connection failures, 5xx, malformed bodies) becomes
//! [`RepositoryError::Transport`]. The `{ error }` body is surfaced in the
//! error message when the service provides one.

use reqwest::{Response, StatusCode};

use taskdeck_proto::task::{Task, TaskDraft, TaskId};
use taskdeck_proto::wire::{ErrorBody, TaskEnvelope, TaskListEnvelope};

use super::{RepositoryError, TaskRepository};

/// reqwest-backed repository against a task service base URL
/// (e.g. `http://127.0.0.1:4000/api`).
#[derive(Debug, Clone)]
pub struct HttpTaskRepository {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTaskRepository {
    /// Creates a repository client for the given base URL. A trailing slash
    /// is tolerated and stripped.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: &TaskId) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }

    /// Converts a non-2xx response into the error taxonomy, pulling the
    /// service's `{ error }` message when the body parses.
    async fn error_for(response: Response, id: Option<&TaskId>) -> RepositoryError {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .map_or_else(|_| status.to_string(), |body| body.error);

        match status {
            StatusCode::BAD_REQUEST => RepositoryError::Validation(message),
            StatusCode::NOT_FOUND => id.map_or_else(
                || RepositoryError::Transport(message.clone()),
                |id| RepositoryError::NotFound(id.clone()),
            ),
            _ => RepositoryError::Transport(message),
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl TaskRepository for HttpTaskRepository {
    async fn list_all(&self) -> Result<Vec<Task>, RepositoryError> {
        let response = self.client.get(self.tasks_url()).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, None).await);
        }
        let envelope: TaskListEnvelope = response.json().await?;
        tracing::debug!(count = envelope.task.len(), "fetched task collection");
        Ok(envelope.task)
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, RepositoryError> {
        let response = self.client.post(self.tasks_url()).json(draft).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, None).await);
        }
        let envelope: TaskEnvelope = response.json().await?;
        tracing::debug!(id = %envelope.task.id, "task created");
        Ok(envelope.task)
    }

    async fn update(&self, task: &Task) -> Result<Task, RepositoryError> {
        let response = self
            .client
            .put(self.task_url(&task.id))
            .json(&task.to_draft())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, Some(&task.id)).await);
        }
        let envelope: TaskEnvelope = response.json().await?;
        tracing::debug!(id = %envelope.task.id, "task updated");
        Ok(envelope.task)
    }

    async fn remove(&self, id: &TaskId) -> Result<(), RepositoryError> {
        let response = self.client.delete(self.task_url(id)).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, Some(id)).await);
        }
        tracing::debug!(id = %id, "task deleted");
        Ok(())
    }
}

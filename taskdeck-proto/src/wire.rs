//! JSON envelope types for the task service's REST API.
//!
//! The upstream service wraps every response in a small envelope: list
//! responses under a singular `task` key, mutations under `{ message, task }`,
//! and failures as `{ error }`. These shapes are kept exactly as the service
//! emits them.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Response body of `GET /tasks`.
///
/// The field is named `task` (singular) even though it carries the whole
/// collection; that is the service's wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListEnvelope {
    /// All tasks, in the service's storage order.
    pub task: Vec<Task>,
}

/// Response body of `POST /tasks`, `PUT /tasks/:id`, and `DELETE /tasks/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEnvelope {
    /// Human-readable outcome description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The created, updated, or deleted task.
    pub task: Task,
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Failure description.
    pub error: String,
}

/// Plain confirmation body (`POST /register` success).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    /// Human-readable outcome description.
    pub message: String,
}

/// Request body of `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name of the new account.
    pub name: String,
    /// Login email; unique per account.
    pub email: String,
    /// Plaintext password; hashing is the server's concern.
    pub password: String,
}

/// Request body of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Response body of a successful `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque session token. The client stores and forwards it verbatim.
    pub token: String,
}

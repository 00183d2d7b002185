//! Task domain model for `TaskDeck`.
//!
//! Defines the [`Task`] entity as exchanged with the remote task service,
//! the closed [`TaskStatus`] and [`TaskPriority`] enumerations, and the
//! [`TaskDraft`] creation payload with its local validation rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Maximum allowed task title length in characters.
pub const MAX_TASK_TITLE_LENGTH: usize = 256;

/// Unique identifier for a task, assigned by the server at creation.
///
/// Opaque to the client: the remote service mints ids and the client never
/// fabricates one. Wraps the service's string representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a `TaskId` from a server-provided string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this task ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Board column a task currently sits in.
///
/// Independent of [`Task::completed`] -- a task may be `InProgress` with
/// `completed == false` and nothing links the two fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started.
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    /// Actively being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Finished.
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// All statuses in board-column order.
    pub const ALL: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Completed];

    /// The wire spelling of this status, as the remote service expects it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ParseEnumError;

    /// Parses a status from its wire spelling or a CLI-friendly alias
    /// (`todo`, `in-progress`, `done`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "to do" | "todo" => Ok(Self::ToDo),
            "in progress" | "in-progress" | "inprogress" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            other => Err(ParseEnumError {
                kind: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Low urgency.
    Low,
    /// Normal urgency (the default).
    #[default]
    Medium,
    /// High urgency.
    High,
}

impl TaskPriority {
    /// The wire spelling of this priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ParseEnumError {
                kind: "priority",
                value: other.to_string(),
            }),
        }
    }
}

/// Error returned when a status or priority string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value: {value:?}")]
pub struct ParseEnumError {
    /// Which enumeration failed to parse (`status` or `priority`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// A task as stored by the remote service.
///
/// `id`, `created_at`, and `updated_at` are server-assigned and read-only
/// to the client; everything else is client-editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned unique identifier.
    #[serde(rename = "_id")]
    pub id: TaskId,
    /// Short human-readable summary; never empty.
    pub title: String,
    /// Free-form details; empty string when unset.
    #[serde(default)]
    pub description: String,
    /// Board column.
    #[serde(default)]
    pub status: TaskStatus,
    /// Urgency.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Optional due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Completion flag, independent of `status`.
    #[serde(default)]
    pub completed: bool,
    /// When the server created the task.
    pub created_at: DateTime<Utc>,
    /// When the server last wrote the task.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Returns a copy of this task with a different status.
    ///
    /// Used by the drag-and-drop path to build the speculative value before
    /// the server confirms.
    #[must_use]
    pub fn with_status(&self, status: TaskStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Returns a copy of this task with the completion flag set.
    #[must_use]
    pub fn with_completed(&self, completed: bool) -> Self {
        Self {
            completed,
            ..self.clone()
        }
    }

    /// Applies a [`TaskPatch`] on top of this task, yielding the merged task
    /// to submit to the server. Unset patch fields keep their current value.
    #[must_use]
    pub fn merged(&self, patch: &TaskPatch) -> Self {
        Self {
            id: self.id.clone(),
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            status: patch.status.unwrap_or(self.status),
            priority: patch.priority.unwrap_or(self.priority),
            due_date: patch.due_date.unwrap_or(self.due_date),
            completed: patch.completed.unwrap_or(self.completed),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Projects the client-editable fields into a request payload.
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            completed: self.completed,
        }
    }
}

/// A task payload lacking a server-assigned identifier.
///
/// Serves as the request body for both creation (`POST /tasks`) and full
/// update (`PUT /tasks/:id`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Required; must be non-empty after trimming.
    pub title: String,
    /// Defaults to empty.
    #[serde(default)]
    pub description: String,
    /// Defaults to `To Do`.
    #[serde(default)]
    pub status: TaskStatus,
    /// Defaults to `Medium`.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Optional due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Defaults to `false`.
    #[serde(default)]
    pub completed: bool,
}

impl TaskDraft {
    /// Creates a draft with the given title and defaults everywhere else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Validates the draft locally, before any network round trip.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::TitleEmpty`] if the title is empty or
    /// whitespace-only, or [`DraftError::TitleTooLong`] if it exceeds
    /// [`MAX_TASK_TITLE_LENGTH`] characters.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::TitleEmpty);
        }
        if self.title.chars().count() > MAX_TASK_TITLE_LENGTH {
            return Err(DraftError::TitleTooLong);
        }
        Ok(())
    }
}

/// Errors produced by local draft validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// Task title cannot be empty.
    #[error("task title cannot be empty")]
    TitleEmpty,
    /// Task title exceeds the maximum length.
    #[error("task title too long (max {MAX_TASK_TITLE_LENGTH} characters)")]
    TitleTooLong,
}

/// Partial field changes for the edit path.
///
/// `None` means "leave unchanged". `due_date` is doubly optional so an edit
/// can clear an existing due date (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title, if changed.
    pub title: Option<String>,
    /// New description, if changed.
    pub description: Option<String>,
    /// New status, if changed.
    pub status: Option<TaskStatus>,
    /// New priority, if changed.
    pub priority: Option<TaskPriority>,
    /// New due date (`Some(None)` clears it), if changed.
    pub due_date: Option<Option<NaiveDate>>,
    /// New completion flag, if changed.
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
    }
}

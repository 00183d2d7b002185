//! REST routes for the task and auth endpoints.
//!
//! Request bodies carry `status`/`priority` as raw strings and are validated
//! here, so invalid enum values produce the service's `400 { error }`
//! contract instead of a generic deserialization rejection. Response
//! envelopes and status codes mirror the upstream service exactly,
//! including the `201` it returns for `GET /tasks`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveDate;

use taskdeck_proto::task::{TaskDraft, TaskId};
use taskdeck_proto::wire::{
    ErrorBody, LoginRequest, LoginResponse, MessageBody, RegisterRequest, TaskEnvelope,
    TaskListEnvelope,
};

use crate::store::TaskStore;
use crate::users::UserStore;

/// Shared server state: the task collection and the account registry.
#[derive(Default)]
pub struct AppState {
    /// In-memory task collection.
    pub tasks: TaskStore,
    /// In-memory account registry.
    pub users: UserStore,
}

impl AppState {
    /// Creates empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Task request body as received on the wire, before validation.
///
/// Enum fields arrive as free strings; [`TaskBody::validate`] maps bad
/// values to the service's error messages.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TaskBody {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    due_date: Option<NaiveDate>,
    completed: Option<bool>,
}

impl TaskBody {
    /// Validates the body into a [`TaskDraft`], defaulting unset fields.
    fn validate(self) -> Result<TaskDraft, &'static str> {
        let title = self.title.unwrap_or_default();
        if title.trim().is_empty() {
            return Err("Title is required");
        }
        let status = match self.status.as_deref() {
            None => taskdeck_proto::task::TaskStatus::default(),
            Some(raw) => raw.parse().map_err(|_| "Invalid status value")?,
        };
        let priority = match self.priority.as_deref() {
            None => taskdeck_proto::task::TaskPriority::default(),
            Some(raw) => raw.parse().map_err(|_| "Invalid priority value")?,
        };
        Ok(TaskDraft {
            title,
            description: self.description.unwrap_or_default(),
            status,
            priority,
            due_date: self.due_date,
            completed: self.completed.unwrap_or(false),
        })
    }
}

fn error_body(message: impl Into<String>) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: message.into(),
    })
}

/// Builds the service router with all `/api` routes attached.
#[must_use]
pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route(
            "/api/tasks",
            axum::routing::get(list_tasks).post(create_task),
        )
        .route(
            "/api/tasks/{id}",
            axum::routing::put(update_task).delete(delete_task),
        )
        .route("/api/register", axum::routing::post(register))
        .route("/api/login", axum::routing::post(login))
        .with_state(state)
}

async fn list_tasks(State(state): State<Arc<AppState>>) -> (StatusCode, Json<TaskListEnvelope>) {
    let tasks = state.tasks.list().await;
    tracing::debug!(count = tasks.len(), "listing tasks");
    // The upstream service answers 201 here; clients accept any 2xx.
    (StatusCode::CREATED, Json(TaskListEnvelope { task: tasks }))
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TaskBody>,
) -> Result<(StatusCode, Json<TaskEnvelope>), (StatusCode, Json<ErrorBody>)> {
    let draft = body
        .validate()
        .map_err(|msg| (StatusCode::BAD_REQUEST, error_body(msg)))?;
    let task = state.tasks.insert(draft).await;
    tracing::info!(id = %task.id, "task created");
    Ok((
        StatusCode::CREATED,
        Json(TaskEnvelope {
            message: Some("Task created successfully".to_string()),
            task,
        }),
    ))
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<TaskBody>,
) -> Result<Json<TaskEnvelope>, (StatusCode, Json<ErrorBody>)> {
    let draft = body
        .validate()
        .map_err(|msg| (StatusCode::BAD_REQUEST, error_body(msg)))?;
    let id = TaskId::new(id);
    let Some(task) = state.tasks.update(&id, draft).await else {
        return Err((StatusCode::NOT_FOUND, error_body("Task not found")));
    };
    tracing::info!(id = %task.id, "task updated");
    Ok(Json(TaskEnvelope {
        message: Some("Task updated successfully".to_string()),
        task,
    }))
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TaskEnvelope>, (StatusCode, Json<ErrorBody>)> {
    let id = TaskId::new(id);
    let Some(task) = state.tasks.remove(&id).await else {
        return Err((StatusCode::NOT_FOUND, error_body("Task not found")));
    };
    tracing::info!(id = %task.id, "task deleted");
    Ok(Json(TaskEnvelope {
        message: Some("Task deleted successfully".to_string()),
        task,
    }))
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageBody>), (StatusCode, Json<ErrorBody>)> {
    state
        .users
        .register(&body.name, &body.email, &body.password)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, error_body(e.to_string())))?;
    Ok((
        StatusCode::CREATED,
        Json(MessageBody {
            message: "User registered successfully".to_string(),
        }),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<ErrorBody>)> {
    match state.users.login(&body.email, &body.password).await {
        Some(token) => Ok(Json(LoginResponse { token })),
        None => Err((
            StatusCode::UNAUTHORIZED,
            error_body("Invalid email or password"),
        )),
    }
}

/// Starts the service with fresh empty state.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(AppState::new())).await
}

/// Starts the service with pre-built [`AppState`], returning the bound
/// address and a join handle. Binding to port 0 yields an OS-assigned
/// port, which is how integration tests run the service in-process.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<AppState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "task service error");
        }
    });

    Ok((bound_addr, handle))
}

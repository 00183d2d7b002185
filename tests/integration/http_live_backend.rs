//! End-to-end tests against an in-process `taskdeck-server`.
//!
//! Starts the reference service on an OS-assigned port and drives the real
//! HTTP repository and auth client against it: CRUD round trips, error-code
//! mapping (400/404), and the register/login flow.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use taskdeck::auth::{AuthClient, AuthError};
use taskdeck::repository::http::HttpTaskRepository;
use taskdeck::repository::{RepositoryError, TaskRepository};
use taskdeck::sync::SyncController;
use taskdeck_proto::task::{TaskDraft, TaskId, TaskStatus};
use taskdeck_server::server::{AppState, start_server_with_state};

/// Starts a fresh service and returns its API base URL.
async fn start_service() -> String {
    let (addr, _handle) = start_server_with_state("127.0.0.1:0", Arc::new(AppState::new()))
        .await
        .expect("failed to start test service");
    format!("http://{addr}/api")
}

#[tokio::test]
async fn crud_round_trip() {
    let base = start_service().await;
    let repo = HttpTaskRepository::new(&base);

    assert!(repo.list_all().await.unwrap().is_empty());

    let created = repo
        .create(&TaskDraft::new("Wire up the board"))
        .await
        .unwrap();
    assert!(!created.id.as_str().is_empty());
    assert_eq!(created.status, TaskStatus::ToDo);

    let mut renamed = created.clone();
    renamed.title = "Wire up the board, renamed".to_string();
    renamed.status = TaskStatus::InProgress;
    let updated = repo.update(&renamed).await.unwrap();
    assert_eq!(updated.title, "Wire up the board, renamed");
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert!(updated.updated_at >= created.updated_at);

    let listed = repo.list_all().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], updated);

    repo.remove(&created.id).await.unwrap();
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_empty_title_maps_to_validation_error() {
    let base = start_service().await;
    let repo = HttpTaskRepository::new(&base);
    let err = repo.create(&TaskDraft::new("")).await.unwrap_err();
    assert_eq!(
        err,
        RepositoryError::Validation("Title is required".to_string())
    );
}

#[tokio::test]
async fn unknown_id_maps_to_not_found() {
    let base = start_service().await;
    let repo = HttpTaskRepository::new(&base);

    let ghost = TaskId::new("does-not-exist");
    let err = repo.remove(&ghost).await.unwrap_err();
    assert_eq!(err, RepositoryError::NotFound(ghost.clone()));

    let mut task = repo.create(&TaskDraft::new("real")).await.unwrap();
    task.id = ghost.clone();
    let err = repo.update(&task).await.unwrap_err();
    assert_eq!(err, RepositoryError::NotFound(ghost));
}

#[tokio::test]
async fn unreachable_service_maps_to_transport_error() {
    // Nothing listens here; connection is refused immediately.
    let repo = HttpTaskRepository::new("http://127.0.0.1:1/api");
    let err = repo.list_all().await.unwrap_err();
    assert!(matches!(err, RepositoryError::Transport(_)));
}

#[tokio::test]
async fn controller_over_live_http() {
    let base = start_service().await;
    let controller = SyncController::new(HttpTaskRepository::new(&base));
    controller.load().await.unwrap();

    let created = controller
        .create(TaskDraft::new("drag me"))
        .await
        .unwrap();
    let moved = controller
        .change_status(&created.id, TaskStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(moved.status, TaskStatus::InProgress);

    // A second controller sees the server state after its own load.
    let other = SyncController::new(HttpTaskRepository::new(&base));
    other.load().await.unwrap();
    assert_eq!(
        other.cache().get(&created.id).map(|t| t.status),
        Some(TaskStatus::InProgress)
    );
}

#[tokio::test]
async fn register_login_and_reject_bad_credentials() {
    let base = start_service().await;
    let auth = AuthClient::new(&base);

    auth.register("Grace", "grace@example.com", "hopper")
        .await
        .unwrap();

    let token = auth.login("grace@example.com", "hopper").await.unwrap();
    assert!(!token.as_str().is_empty());

    let err = auth.login("grace@example.com", "wrong").await.unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);

    // Duplicate registration surfaces the server's failure.
    let err = auth
        .register("Grace again", "grace@example.com", "pw")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Server(_)));
}

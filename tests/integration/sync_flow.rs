//! Integration tests for the synchronization controller against the
//! in-process repository.
//!
//! Covers the full mutation surface: load success/failure, fail-fast
//! creation, pessimistic edit/delete, delete-on-complete, and the
//! optimistic drag-and-drop path with commit and rollback.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskdeck::repository::RepositoryError;
use taskdeck::repository::memory::MemoryTaskRepository;
use taskdeck::store::LoadStatus;
use taskdeck::sync::{SyncController, SyncError};
use taskdeck_proto::task::{DraftError, TaskDraft, TaskId, TaskPatch, TaskStatus};

async fn loaded_controller(titles: &[&str]) -> SyncController<MemoryTaskRepository> {
    let drafts = titles.iter().map(|t| TaskDraft::new(*t)).collect();
    let controller = SyncController::new(MemoryTaskRepository::seeded(drafts));
    controller.load().await.expect("seed load");
    controller
}

fn first_id(controller: &SyncController<MemoryTaskRepository>) -> TaskId {
    controller
        .cache()
        .iter()
        .next()
        .map(|t| t.id.clone())
        .expect("cache not empty")
}

// --- load ---

#[tokio::test]
async fn load_mirrors_repository_order() {
    let controller = loaded_controller(&["first", "second", "third"]).await;
    let titles: Vec<String> = controller
        .cache()
        .iter()
        .map(|t| t.title.clone())
        .collect();
    assert_eq!(titles, ["first", "second", "third"]);
    assert_eq!(controller.cache().status(), LoadStatus::Succeeded);
}

#[tokio::test]
async fn reload_after_failure_recovers() {
    let controller = loaded_controller(&["kept"]).await;
    controller
        .repository()
        .fail_next(RepositoryError::Transport("flaky".to_string()));
    assert!(controller.load().await.is_err());
    assert_eq!(controller.cache().status(), LoadStatus::Failed);
    assert_eq!(controller.last_error().as_deref(), Some("task service unreachable: flaky"));

    controller.load().await.unwrap();
    assert_eq!(controller.cache().status(), LoadStatus::Succeeded);
    assert!(controller.last_error().is_none());
}

// --- create ---

#[tokio::test]
async fn create_with_empty_title_fails_synchronously() {
    let repo = MemoryTaskRepository::new();
    let controller = SyncController::new(repo);
    let err = controller.create(TaskDraft::new("")).await.unwrap_err();
    assert_eq!(err, SyncError::Draft(DraftError::TitleEmpty));
    // Fail-fast: the repository was never consulted.
    assert_eq!(controller.repository().calls(), 0);
}

#[tokio::test]
async fn create_appends_confirmed_task_at_the_end() {
    let controller = loaded_controller(&["existing"]).await;
    let created = controller.create(TaskDraft::new("brand new")).await.unwrap();
    let ids: Vec<TaskId> = controller.cache().iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids.last(), Some(&created.id));
    assert_eq!(ids.len(), 2);
}

// --- edit ---

#[tokio::test]
async fn edit_merges_patch_through_the_server() {
    let controller = loaded_controller(&["draft title"]).await;
    let id = first_id(&controller);
    let patch = TaskPatch {
        description: Some("now with details".to_string()),
        status: Some(TaskStatus::InProgress),
        ..TaskPatch::default()
    };
    let updated = controller.edit(&id, &patch).await.unwrap();
    assert_eq!(updated.title, "draft title");
    assert_eq!(updated.description, "now with details");
    assert_eq!(updated.status, TaskStatus::InProgress);
    // Server-confirmed value is what the cache holds.
    assert_eq!(controller.cache().get(&id), Some(&updated));
}

#[tokio::test]
async fn edit_unknown_id_reports_not_cached() {
    let controller = loaded_controller(&[]).await;
    let err = controller
        .edit(&TaskId::new("nope"), &TaskPatch::default())
        .await
        .unwrap_err();
    assert_eq!(err, SyncError::NotCached(TaskId::new("nope")));
}

// --- remove ---

#[tokio::test]
async fn remove_confirmed_by_server_clears_cache_entry() {
    let controller = loaded_controller(&["short-lived"]).await;
    let id = first_id(&controller);
    controller.remove(&id).await.unwrap();
    assert!(controller.cache().is_empty());
    assert!(controller.repository().get(&id).is_none());
}

#[tokio::test]
async fn remove_not_found_leaves_cache_entry_for_reload() {
    let controller = loaded_controller(&["stale"]).await;
    let id = first_id(&controller);
    controller
        .repository()
        .fail_next(RepositoryError::NotFound(id.clone()));
    let err = controller.remove(&id).await.unwrap_err();
    assert!(matches!(
        err,
        SyncError::Repository(RepositoryError::NotFound(_))
    ));
    // Entry stays visible; reconciliation is the caller's decision.
    assert!(controller.cache().get(&id).is_some());
}

// --- toggle_complete (delete-on-complete) ---

#[tokio::test]
async fn first_toggle_marks_complete_second_toggle_deletes() {
    let controller = loaded_controller(&["two-phase"]).await;
    let id = first_id(&controller);

    let toggled = controller.toggle_complete(&id).await.unwrap();
    assert!(toggled.is_some_and(|t| t.completed));
    assert!(controller.cache().get(&id).is_some());

    // Completed tasks are archived by deletion.
    let second = controller.toggle_complete(&id).await.unwrap();
    assert!(second.is_none());
    assert!(controller.cache().get(&id).is_none());
    assert!(controller.repository().get(&id).is_none());
}

#[tokio::test]
async fn toggle_failure_keeps_flag_unset() {
    let controller = loaded_controller(&["resilient"]).await;
    let id = first_id(&controller);
    controller
        .repository()
        .fail_next(RepositoryError::Transport("offline".to_string()));
    assert!(controller.toggle_complete(&id).await.is_err());
    assert!(controller.cache().get(&id).is_some_and(|t| !t.completed));
}

// --- change_status (optimistic path) ---

#[tokio::test]
async fn change_status_commits_server_value() {
    let controller = loaded_controller(&["dragged"]).await;
    let id = first_id(&controller);
    let moved = controller
        .change_status(&id, TaskStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(moved.status, TaskStatus::InProgress);
    assert_eq!(controller.cache().get(&id), Some(&moved));
    // The repository agrees with the cache.
    assert_eq!(
        controller.repository().get(&id).map(|t| t.status),
        Some(TaskStatus::InProgress)
    );
}

#[tokio::test]
async fn change_status_rolls_back_on_rejection() {
    let controller = loaded_controller(&["dragged back"]).await;
    let id = first_id(&controller);
    let before = controller.cache().get(&id).cloned().unwrap();
    assert_eq!(before.status, TaskStatus::ToDo);

    controller
        .repository()
        .fail_next(RepositoryError::Validation("rejected".to_string()));
    let err = controller
        .change_status(&id, TaskStatus::Completed)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Repository(RepositoryError::Validation(_))
    ));
    // The pre-mutation snapshot is restored, not the optimistic value.
    assert_eq!(controller.cache().get(&id), Some(&before));
    assert!(controller.cache().invariant_holds());
    assert!(controller.last_error().is_some());
}

#[tokio::test]
async fn rollback_after_rollback_still_consistent() {
    let controller = loaded_controller(&["stubborn"]).await;
    let id = first_id(&controller);
    let original = controller.cache().get(&id).cloned().unwrap();

    for _ in 0..3 {
        controller
            .repository()
            .fail_next(RepositoryError::Transport("offline".to_string()));
        assert!(
            controller
                .change_status(&id, TaskStatus::InProgress)
                .await
                .is_err()
        );
        assert_eq!(controller.cache().get(&id), Some(&original));
    }

    // Once the service recovers, the move goes through.
    let moved = controller
        .change_status(&id, TaskStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(moved.status, TaskStatus::InProgress);
}

// --- error observation ---

#[tokio::test]
async fn success_clears_recorded_error() {
    let controller = loaded_controller(&["noisy"]).await;
    let id = first_id(&controller);
    controller
        .repository()
        .fail_next(RepositoryError::Transport("blip".to_string()));
    assert!(controller.change_status(&id, TaskStatus::Completed).await.is_err());
    assert!(controller.last_error().is_some());

    controller
        .change_status(&id, TaskStatus::Completed)
        .await
        .unwrap();
    assert!(controller.last_error().is_none());
}

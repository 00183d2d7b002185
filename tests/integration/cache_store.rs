//! Integration tests for the task cache and its board projection.
//!
//! Exercises longer mixed sequences of cache operations than the unit
//! tests: invariant preservation, wholesale replacement over a dirty
//! cache, live iteration, and the grouped projection presentation
//! bindings consume.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::Utc;

use taskdeck::board::Board;
use taskdeck::store::{LoadStatus, TaskCache};
use taskdeck_proto::task::{Task, TaskId, TaskPriority, TaskStatus};

fn make_task(id: &str, title: &str, status: TaskStatus) -> Task {
    Task {
        id: TaskId::new(id),
        title: title.to_string(),
        description: String::new(),
        status,
        priority: TaskPriority::Medium,
        due_date: None,
        completed: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn mixed_sequence_preserves_invariant_at_every_step() {
    let mut cache = TaskCache::new();
    let steps: Vec<Box<dyn Fn(&mut TaskCache)>> = vec![
        Box::new(|c| c.upsert(make_task("a", "A", TaskStatus::ToDo))),
        Box::new(|c| c.upsert(make_task("b", "B", TaskStatus::InProgress))),
        Box::new(|c| c.upsert(make_task("a", "A2", TaskStatus::Completed))),
        Box::new(|c| c.remove(&TaskId::new("missing"))),
        Box::new(|c| c.remove(&TaskId::new("a"))),
        Box::new(|c| c.replace_all(vec![make_task("x", "X", TaskStatus::ToDo)])),
        Box::new(|c| c.remove(&TaskId::new("x"))),
    ];

    for step in steps {
        step(&mut cache);
        assert!(cache.invariant_holds());
    }
    assert!(cache.is_empty());
}

#[test]
fn replace_all_yields_exactly_the_given_tasks_in_order() {
    let mut cache = TaskCache::new();
    // Dirty the cache first; replacement must not care.
    cache.upsert(make_task("junk", "Old", TaskStatus::Completed));

    let t1 = make_task("t1", "One", TaskStatus::ToDo);
    let t2 = make_task("t2", "Two", TaskStatus::InProgress);
    cache.replace_all(vec![t1.clone(), t2.clone()]);

    let projected: Vec<&Task> = cache.iter().collect();
    assert_eq!(projected, [&t1, &t2]);
    assert_eq!(cache.status(), LoadStatus::Succeeded);
}

#[test]
fn projection_restarts_and_reflects_live_state() {
    let mut cache = TaskCache::new();
    cache.upsert(make_task("a", "A", TaskStatus::ToDo));

    let first_pass: Vec<String> = cache.iter().map(|t| t.id.to_string()).collect();
    assert_eq!(first_pass, ["a"]);

    cache.upsert(make_task("b", "B", TaskStatus::ToDo));
    let second_pass: Vec<String> = cache.iter().map(|t| t.id.to_string()).collect();
    assert_eq!(second_pass, ["a", "b"]);
}

#[test]
fn upsert_read_back_is_deep_equal() {
    let mut cache = TaskCache::new();
    let mut task = make_task("rt", "Round trip", TaskStatus::InProgress);
    task.description = "all fields populated".to_string();
    task.priority = TaskPriority::High;
    task.completed = true;
    cache.upsert(task.clone());
    assert_eq!(cache.get(&task.id), Some(&task));
}

#[test]
fn board_projection_has_all_columns_grouped() {
    let mut cache = TaskCache::new();
    cache.upsert(make_task("1", "todo-1", TaskStatus::ToDo));
    cache.upsert(make_task("2", "doing", TaskStatus::InProgress));
    cache.upsert(make_task("3", "todo-2", TaskStatus::ToDo));
    cache.upsert(make_task("4", "done", TaskStatus::Completed));

    let board = Board::from_cache(&cache);
    assert_eq!(board.columns.len(), 3);

    let todo = board.column(TaskStatus::ToDo).unwrap();
    let ids: Vec<&str> = todo.tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);
    assert_eq!(board.column(TaskStatus::Completed).unwrap().tasks.len(), 1);
}

#[test]
fn status_flag_lifecycle() {
    let mut cache = TaskCache::new();
    assert_eq!(cache.status(), LoadStatus::Idle);

    // Terminal states are only reachable through Loading.
    cache.set_status(LoadStatus::Failed);
    assert_eq!(cache.status(), LoadStatus::Idle);

    cache.set_status(LoadStatus::Loading);
    cache.set_status(LoadStatus::Succeeded);
    assert_eq!(cache.status(), LoadStatus::Succeeded);

    // A new load supersedes a terminal state.
    cache.set_status(LoadStatus::Loading);
    assert_eq!(cache.status(), LoadStatus::Loading);
    cache.set_status(LoadStatus::Failed);
    assert_eq!(cache.status(), LoadStatus::Failed);
}

//! Property-based tests for the task cache invariant.
//!
//! Uses proptest to verify, for arbitrary sequences of cache operations:
//! 1. The id list and entity map stay set-equal after every step.
//! 2. Iteration order matches a simple insertion-order model.
//! 3. `replace_all` makes the cache independent of all prior history.

use chrono::Utc;
use proptest::prelude::*;

use taskdeck::store::TaskCache;
use taskdeck_proto::task::{Task, TaskId, TaskPriority, TaskStatus};

/// A cache operation with ids drawn from a small pool so sequences collide.
#[derive(Debug, Clone)]
enum Op {
    Upsert(u8),
    Remove(u8),
    ReplaceAll(Vec<u8>),
}

fn make_task(key: u8) -> Task {
    Task {
        id: TaskId::new(format!("task-{key}")),
        title: format!("title {key}"),
        description: String::new(),
        status: TaskStatus::ToDo,
        priority: TaskPriority::Medium,
        due_date: None,
        completed: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Strategy for a single cache operation over an 8-id pool.
fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8).prop_map(Op::Upsert),
        (0u8..8).prop_map(Op::Remove),
        prop::collection::vec(0u8..8, 0..6).prop_map(Op::ReplaceAll),
    ]
}

/// Reference model: insertion-ordered unique keys.
fn apply_model(model: &mut Vec<u8>, op: &Op) {
    match op {
        Op::Upsert(key) => {
            if !model.contains(key) {
                model.push(*key);
            }
        }
        Op::Remove(key) => model.retain(|k| k != key),
        Op::ReplaceAll(keys) => {
            model.clear();
            for key in keys {
                if !model.contains(key) {
                    model.push(*key);
                }
            }
        }
    }
}

fn apply_cache(cache: &mut TaskCache, op: &Op) {
    match op {
        Op::Upsert(key) => cache.upsert(make_task(*key)),
        Op::Remove(key) => cache.remove(&TaskId::new(format!("task-{key}"))),
        Op::ReplaceAll(keys) => {
            // Duplicate keys in the payload collapse onto one entry, like a
            // server response repeating an id would.
            cache.replace_all(keys.iter().map(|k| make_task(*k)).collect());
        }
    }
}

proptest! {
    #[test]
    fn invariant_holds_after_every_operation(ops in prop::collection::vec(arb_op(), 1..64)) {
        let mut cache = TaskCache::new();
        for op in &ops {
            apply_cache(&mut cache, op);
            prop_assert!(cache.invariant_holds());
        }
    }

    #[test]
    fn iteration_matches_insertion_order_model(ops in prop::collection::vec(arb_op(), 1..64)) {
        let mut cache = TaskCache::new();
        let mut model: Vec<u8> = Vec::new();
        for op in &ops {
            apply_cache(&mut cache, op);
            apply_model(&mut model, op);
        }

        let cache_ids: Vec<String> = cache.iter().map(|t| t.id.to_string()).collect();
        let model_ids: Vec<String> = model.iter().map(|k| format!("task-{k}")).collect();
        prop_assert_eq!(cache_ids, model_ids);
        prop_assert_eq!(cache.len(), model.len());
    }

    #[test]
    fn replace_all_erases_history(
        prefix in prop::collection::vec(arb_op(), 0..32),
        keys in prop::collection::vec(0u8..8, 0..8),
    ) {
        let mut dirty = TaskCache::new();
        for op in &prefix {
            apply_cache(&mut dirty, op);
        }
        dirty.replace_all(keys.iter().map(|k| make_task(*k)).collect());

        let mut fresh = TaskCache::new();
        fresh.replace_all(keys.iter().map(|k| make_task(*k)).collect());

        let dirty_ids: Vec<String> = dirty.iter().map(|t| t.id.to_string()).collect();
        let fresh_ids: Vec<String> = fresh.iter().map(|t| t.id.to_string()).collect();
        prop_assert_eq!(dirty_ids, fresh_ids);
    }
}

//! Shared domain model and REST wire types for `TaskDeck`.

pub mod task;
pub mod wire;

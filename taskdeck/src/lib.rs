//! `TaskDeck` -- synchronized task-board client library.

pub mod auth;
pub mod board;
pub mod config;
pub mod repository;
pub mod store;
pub mod sync;

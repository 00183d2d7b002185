//! `TaskDeck` reference task service -- in-memory REST backend.
//!
//! Implements the task and auth endpoints the client consumes, with the
//! same response envelopes and status codes as the upstream service.
//! State lives in memory; this is a development and test backend, not a
//! persistence layer.

pub mod config;
pub mod server;
pub mod store;
pub mod users;

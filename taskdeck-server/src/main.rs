//! `TaskDeck` reference task service -- in-memory REST backend.
//!
//! Serves the task CRUD and auth endpoints the `taskdeck` client consumes.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:4000
//! cargo run --bin taskdeck-server
//!
//! # Run on custom address
//! cargo run --bin taskdeck-server -- --bind 127.0.0.1:8080
//! ```

use std::sync::Arc;

use clap::Parser;
use taskdeck_server::config::{ServerCliArgs, ServerConfig};
use taskdeck_server::server::{AppState, start_server_with_state};

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting task service");

    match start_server_with_state(&config.bind_addr, Arc::new(AppState::new())).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "task service listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "task service task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start task service");
            std::process::exit(1);
        }
    }
}

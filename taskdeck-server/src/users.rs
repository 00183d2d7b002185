//! In-memory account registry and session tokens.
//!
//! A development fixture: passwords are compared in memory and tokens are
//! opaque UUIDs. The client treats token issuance as a black box, so this
//! stand-in satisfies the same contract as a real credential service.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Errors the registry can produce.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    /// An account with this email already exists.
    #[error("email already registered: {0}")]
    EmailTaken(String),
}

struct Account {
    name: String,
    password: String,
}

/// Thread-safe in-memory user registry.
#[derive(Default)]
pub struct UserStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl UserStore {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::EmailTaken`] when the email is already in use.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), UserError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(UserError::EmailTaken(email.to_string()));
        }
        accounts.insert(
            email.to_string(),
            Account {
                name: name.to_string(),
                password: password.to_string(),
            },
        );
        tracing::info!(email = %email, "account registered");
        Ok(())
    }

    /// Checks credentials and mints a session token on success.
    pub async fn login(&self, email: &str, password: &str) -> Option<String> {
        let accounts = self.accounts.read().await;
        let account = accounts.get(email)?;
        if account.password != password {
            return None;
        }
        tracing::debug!(email = %email, name = %account.name, "login succeeded");
        Some(Uuid::now_v7().simple().to_string())
    }
}

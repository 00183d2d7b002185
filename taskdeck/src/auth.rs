//! Client for the remote auth service.
//!
//! Two calls, both thin: `register` creates an account, `login` exchanges
//! credentials for an opaque session token. Token issuance and password
//! hashing are the server's business; the client stores and forwards the
//! token verbatim.

use taskdeck_proto::wire::{ErrorBody, LoginRequest, LoginResponse, RegisterRequest};

/// Errors the auth calls can fail with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The service rejected the email/password pair (HTTP 401).
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration or login failed server-side.
    #[error("auth service error: {0}")]
    Server(String),

    /// Network failure or a malformed response.
    #[error("auth service unreachable: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// An opaque session token returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// The raw token string, e.g. for an `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// reqwest-backed client for the auth endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    client: reqwest::Client,
}

impl AuthClient {
    /// Creates a client for the given auth base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Server`] when the service refuses the account
    /// (e.g. duplicate email), [`AuthError::Transport`] on network failure.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(format!("{}/register", self.base_url))
            .json(&body)
            .send()
            .await?;
        if response.status().is_success() {
            tracing::info!(email = %email, "account registered");
            return Ok(());
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .map_or_else(|_| "registration failed".to_string(), |b| b.error);
        Err(AuthError::Server(message))
    }

    /// Exchanges credentials for a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on 401,
    /// [`AuthError::Server`] on other service failures,
    /// [`AuthError::Transport`] on network failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Token, AuthError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&body)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let login: LoginResponse = response.json().await?;
                tracing::info!(email = %email, "logged in");
                Ok(Token(login.token))
            }
            reqwest::StatusCode::UNAUTHORIZED => Err(AuthError::InvalidCredentials),
            _ => {
                let message = response
                    .json::<ErrorBody>()
                    .await
                    .map_or_else(|_| "login failed".to_string(), |b| b.error);
                Err(AuthError::Server(message))
            }
        }
    }
}

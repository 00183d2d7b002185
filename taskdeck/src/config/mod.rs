//! Configuration system for the `TaskDeck` client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskdeck/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    service: ServiceFileConfig,
    auth: AuthFileConfig,
}

/// `[service]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServiceFileConfig {
    api_url: Option<String>,
}

/// `[auth]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct AuthFileConfig {
    url: Option<String>,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// Global CLI arguments shared by every subcommand.
#[derive(clap::Args, Debug, Default)]
pub struct CliArgs {
    /// Base URL of the task service API.
    #[arg(long, env = "TASKDECK_API_URL")]
    pub api_url: Option<String>,

    /// Base URL of the auth service (defaults to the task service URL).
    #[arg(long, env = "TASKDECK_AUTH_URL")]
    pub auth_url: Option<String>,

    /// Path to config file (default: `~/.config/taskdeck/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", env = "TASKDECK_LOG")]
    pub log_level: String,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the task service API (e.g. `http://127.0.0.1:4000/api`).
    pub api_url: String,
    /// Base URL of the auth service.
    pub auth_url: String,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:4000/api".to_string(),
            auth_url: "http://127.0.0.1:4000/api".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit config file cannot be read
    /// or any file fails to parse.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `Config` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. The auth URL falls back to the
    /// resolved task service URL when not given anywhere.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        let api_url = cli
            .api_url
            .clone()
            .or_else(|| file.service.api_url.clone())
            .unwrap_or(defaults.api_url);
        let auth_url = cli
            .auth_url
            .clone()
            .or_else(|| file.auth.url.clone())
            .unwrap_or_else(|| api_url.clone());

        Self {
            api_url,
            auth_url,
            log_level: cli.log_level.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskdeck").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}

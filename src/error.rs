//! Error types for the fabnet network bootstrapper.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration document errors (template load, serialization, persistence)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config template: {0}")]
    Template(#[from] serde_yaml::Error),

    #[error("Failed to serialize config document: {0}")]
    Serialize(serde_yaml::Error),

    #[error("Failed to write config to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Command construction errors
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Setter '{setter}' is not valid for command '{active}' (allowed: {})", allowed.join(", "))]
    InvalidCommandState {
        setter: String,
        active: String,
        allowed: Vec<String>,
    },

    #[error("No command selected; call set_command() before '{setter}'")]
    NoCommandSelected { setter: String },
}

/// External process supervision errors
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to spawn '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{binary}' exited with {}\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}", exit_code.map(|c| format!("code {}", c)).unwrap_or_else(|| "no exit code (signal)".to_string()))]
    Exit {
        binary: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Failed to wait on '{binary}': {source}")]
    Wait {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Supervision of '{binary}' was cancelled")]
    Cancelled { binary: String },
}

/// Status payload errors for the commit-quorum workflow
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Failed to parse approval status payload: {source}; payload was: {payload}")]
    Parse {
        payload: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Polling primitive errors
#[derive(Debug, Error)]
pub enum PollError {
    #[error("Gave up after {attempts} polling attempts")]
    AttemptsExhausted { attempts: u32 },

    #[error("Polling was cancelled")]
    Cancelled,
}

/// Top-level error for the CLI layer
#[derive(Debug, Error)]
pub enum FabnetError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    #[error("Status error: {0}")]
    Status(#[from] StatusError),

    #[error("Poll error: {0}")]
    Poll(#[from] PollError),

    #[error("Tool configuration error: {0}")]
    ToolConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for FabnetError {
    fn from(err: config::ConfigError) -> Self {
        FabnetError::ToolConfig(err.to_string())
    }
}

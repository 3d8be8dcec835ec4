// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::chrony::sequencer::SequenceError;

#[derive(Error, Debug)]
pub enum ChronyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("chronyc not found: verify that chrony is installed and that chronyc is in your PATH")]
    ToolNotFound,

    /// chronyc could not be spawned, timed out, or exited non-zero.
    #[error("failed to run command {argv}: {reason} - {output}")]
    Execution {
        argv: String,
        reason: String,
        output: String,
    },

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ChronyError>;

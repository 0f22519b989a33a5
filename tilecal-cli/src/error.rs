//! CLI error type.

use thiserror::Error;
use tilecal::config::ConfigError;
use tilecal::{MatrixError, SequenceError};

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tile matrix error: {0}")]
    Matrix(#[from] MatrixError),

    #[error("{0}")]
    Sequence(#[from] SequenceError),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

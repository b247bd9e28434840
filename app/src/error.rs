//! Application error handling
//!
//! Wraps the shared library errors together with configuration and I/O
//! failures of the native host.

use swasth_kadam_shared::{ExportError, ImportError, StoreError, WizardError};
use thiserror::Error;

/// Host error type returned by every command
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Registration failed: {0}")]
    Wizard(#[from] WizardError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for commands
pub type AppResult<T> = Result<T, AppError>;

//! Error types for the Swasth Kadam application

use crate::registration::WizardStep;
use crate::validation::ValidationError;
use thiserror::Error;

/// Key-value store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Backup import rejections
///
/// Any of these leaves the stored tracking list unchanged.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Backup is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Backup must contain a JSON array of tracked foods")]
    NotAnArray,

    #[error("Backup entry {index} is not a tracked food: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Backup export failures
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV export produced invalid UTF-8")]
    Encoding,
}

/// Rejected registration wizard actions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error("{}", .0.user_message())]
    Validation(ValidationError),

    #[error("Please accept the terms to complete registration")]
    ConsentRequired,

    #[error("Skip & Explore is only available on steps 3 and 4 (current step {})", .0.number())]
    SkipNotAllowed(WizardStep),

    #[error("Registration can only be completed from the summary step (current step {})", .0.number())]
    NotAtSummary(WizardStep),

    #[error("Use Complete Registration on the summary step")]
    NoNextStep,

    #[error("The registration wizard has already finished")]
    Finished,
}

impl From<ValidationError> for WizardError {
    fn from(err: ValidationError) -> Self {
        WizardError::Validation(err)
    }
}

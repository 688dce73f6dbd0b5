//! Error types for the donation wizard.
//!
//! Application edges use `anyhow`; the wizard core reports through these
//! typed errors so callers can tell a recoverable validation failure from a
//! rejected submission.

use crate::state::ValidationResult;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the durable draft slot.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the slot file failed.
    #[error("draft storage I/O failed at {path}: {source}")]
    Io {
        /// Path of the slot file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The draft could not be serialized.
    #[error("draft serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    /// Create an I/O error for the given path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why a submit attempt did not go through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Submission is only possible from the review step.
    #[error("donation can only be submitted from the review step")]
    NotOnReviewStep,

    /// A submission is already in flight.
    #[error("a submission is already in progress")]
    AlreadyPending,

    /// The final guard found invalid fields.
    #[error("please fix the highlighted fields: {0}")]
    Invalid(ValidationResult),

    /// The submission service refused or failed the request.
    #[error("{0}")]
    Rejected(String),
}

impl SubmitError {
    /// The single user-facing message for a submission failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(msg) => format!("Submission failed: {msg}. Please try again."),
            other => other.to_string(),
        }
    }
}

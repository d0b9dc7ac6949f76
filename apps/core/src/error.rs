use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents invalid caller input (bad filters, bad top-K, malformed input document).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., unparsable environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents a failure of the optional language model collaborator.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Model(e) => AppError::Model(e.clone()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

/// Failures reported by a [`crate::analysis::LanguageModel`].
///
/// Both variants are recovered locally by falling back to the keyword-based scorers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// No model is loaded (null model, missing weights).
    #[error("model unavailable")]
    Unavailable,

    /// The model was invoked and failed.
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Why a `Date` header could not be turned into a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("empty date header")]
    Empty,

    #[error("unparsable date '{value}': {reason}")]
    Malformed { value: String, reason: String },
}

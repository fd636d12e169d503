// src/error.rs

use thiserror::Error;

/// Global Application Error Enum.
/// Malformed code-block markup is reported as data (`ParseError`), not here;
/// only the conditions that abort an operation live in this enum.
#[derive(Debug, Error)]
pub enum AppError {
    // Rich text rejected before save. Carries the user-facing message.
    #[error("{0}")]
    ValidationFailed(String),

    // Bad command line usage
    #[error("{0}")]
    BadRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for the command line tool.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::ValidationFailed(_) => 1,
            AppError::BadRequest(_) => 2,
            AppError::Io(_) | AppError::Serialization(_) => 1,
        }
    }
}

//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("unsupported function: {0} (only addTwoNumbers is known)")]
    UnsupportedFunction(String),

    #[error("unsupported return type for {function}: {return_type}")]
    UnsupportedReturnType {
        function: String,
        return_type: String,
    },

    #[error("invalid case file {path}: {message}")]
    InvalidCaseFile { path: PathBuf, message: String },

    #[error("problems directory not found: {0}")]
    ProblemsDirNotFound(PathBuf),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

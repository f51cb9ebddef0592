//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("invalid tree: {0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("cannot parse tree file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("cannot load {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    #[error("cannot serialize tree: {message}")]
    Serialize { message: String },

    #[error("tree source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

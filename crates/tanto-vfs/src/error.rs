use thiserror::Error;

use tanto_core::error::CoreError;

/// Error type for resource tree operations.
///
/// Each variant is a correctness or authorization decision and propagates
/// to the caller unchanged; nothing here is retried. Backing I/O failures
/// stay in [`TreeError::Io`], deliberately unclassified - translating
/// them into a transport failure is the caller's job.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Lock conflict on {0}")]
    LockConflict(String),
    #[error("Unknown lock token: {0}")]
    UnknownLockToken(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for TreeError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidPath(msg) => Self::InvalidName(msg),
            other => Self::InvalidName(other.to_string()),
        }
    }
}

pub type TreeResult<T> = std::result::Result<T, TreeError>;

use thiserror::Error;

use crate::Revision;

/// Errors raised while constructing nodes or talking to the page store.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("page transaction has no active revision root")]
    NoRevisionRoot,

    #[error("another write transaction is already active on this resource")]
    WriterActive,

    #[error("revision {0} has not been committed")]
    RevisionNotFound(Revision),

    #[error("internal storage error: {0}")]
    StorageError(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        if value.kind() == std::io::ErrorKind::InvalidInput {
            Error::InvalidRequest(value.to_string())
        } else {
            Error::StorageError(value.to_string())
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        match value {
            Error::InvalidRequest(msg) => Self::new(std::io::ErrorKind::InvalidInput, msg),
            other => Self::new(std::io::ErrorKind::Other, other.to_string()),
        }
    }
}

//! Errors returned by the book store

use tonic::Status;

use crate::key::composite::KeyError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookError {
    #[error("Incorrect number of arguments. Expecting {expected}")]
    Arity { expected: String, got: usize },

    #[error("invalid key component: {0}")]
    InvalidComponent(String),

    #[error("malformed composite key: {0}")]
    MalformedKey(String),

    #[error("unable to scan the ledger: {0}")]
    Scan(String),

    #[error("Invalid Smart Contract function name: {0}")]
    UnknownOperation(String),

    #[error("invalid record field: {0}")]
    InvalidField(String),

    #[error("ledger error: {0}")]
    Ledger(String),

    #[error("unable to import the catalog: {0}")]
    Catalog(String),
}

impl From<KeyError> for BookError {
    fn from(e: KeyError) -> Self {
        match e {
            KeyError::InvalidComponent(msg) => Self::InvalidComponent(msg),
            KeyError::MalformedKey(msg) => Self::MalformedKey(msg),
        }
    }
}

impl From<BookError> for Status {
    fn from(e: BookError) -> Self {
        let msg: String = e.to_string();
        match e {
            BookError::Arity { .. } => Status::invalid_argument(msg),
            BookError::InvalidComponent(_) => Status::invalid_argument(msg),
            BookError::InvalidField(_) => Status::invalid_argument(msg),
            BookError::MalformedKey(_) => Status::data_loss(msg),
            BookError::Scan(_) => Status::internal(msg),
            BookError::UnknownOperation(_) => Status::unimplemented(msg),
            BookError::Ledger(_) => Status::unavailable(msg),
            BookError::Catalog(_) => Status::failed_precondition(msg),
        }
    }
}

/// Failures reported by the ledger itself (not by a cursor mid-scan).
pub fn ledger_err(s: Status) -> BookError {
    BookError::Ledger(s.message().into())
}

pub fn scan_err(s: Status) -> BookError {
    BookError::Scan(s.message().into())
}

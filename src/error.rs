use serde::Serialize;
use thiserror::Error;

/// Every way an invocation, or the input layer feeding invocations, can fail.
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Incorrect number of arguments. Expecting {expected}, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },
    #[error("Unauthorized party: {0}")]
    UnauthorizedParty(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order already exists: {0}")]
    DuplicateOrder(String),
    #[error("Illegal transition from {from} to {to}")]
    IllegalTransition { from: String, to: String },
    #[error("Corrupt record under key {key}: {reason}")]
    CorruptRecord { key: String, reason: String },
    #[error("Invalid Smart Contract function name: {0}")]
    UnknownOperation(String),
    #[error("Store error: {0}")]
    StoreError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Machine-readable error category reported alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    ArgumentCountError,
    UnauthorizedParty,
    ValidationError,
    NotFound,
    DuplicateOrder,
    IllegalTransition,
    CorruptRecord,
    UnknownOperation,
    StoreError,
    InputError,
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::ArgumentCount { .. } => ErrorKind::ArgumentCountError,
            OrderError::UnauthorizedParty(_) => ErrorKind::UnauthorizedParty,
            OrderError::ValidationError(_) => ErrorKind::ValidationError,
            OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::DuplicateOrder(_) => ErrorKind::DuplicateOrder,
            OrderError::IllegalTransition { .. } => ErrorKind::IllegalTransition,
            OrderError::CorruptRecord { .. } => ErrorKind::CorruptRecord,
            OrderError::UnknownOperation(_) => ErrorKind::UnknownOperation,
            OrderError::StoreError(_) => ErrorKind::StoreError,
            OrderError::CsvError(_) | OrderError::IoError(_) => ErrorKind::InputError,
        }
    }
}

pub type Result<T> = std::result::Result<T, OrderError>;

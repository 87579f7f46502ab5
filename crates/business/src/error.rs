//! Business layer errors
//!
//! Every failure the service can report, with the kind of the lower-layer
//! error preserved on conversion.

use branchbank_core::CoreError;
use branchbank_persistence::PersistenceError;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Business operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusinessError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("An account already exists for CPF {0}")]
    DuplicateOwner(String),

    #[error("Duplicate account id: {0}")]
    DuplicateKey(String),

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },
}

/// Result type alias for business operations
pub type BusinessResult<T> = Result<T, BusinessError>;

/// Error kind, independent of the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    DuplicateOwner,
    DuplicateKey,
    NotFound,
    InsufficientFunds,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::DuplicateOwner => "duplicate_owner",
            ErrorKind::DuplicateKey => "duplicate_key",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InsufficientFunds => "insufficient_funds",
        };
        write!(f, "{}", s)
    }
}

impl BusinessError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(account_id: &str) -> Self {
        Self::NotFound(account_id.to_string())
    }

    pub fn insufficient_funds(required: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }

    /// Convert a core error, prefixing `InvalidArgument` messages with
    /// `context`. The kind is unchanged.
    pub fn from_core_with_context(err: CoreError, context: &str) -> Self {
        match err {
            CoreError::InvalidArgument(message) => {
                Self::InvalidArgument(format!("{}: {}", context, message))
            }
            other => other.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::DuplicateOwner(_) => ErrorKind::DuplicateOwner,
            Self::DuplicateKey(_) => ErrorKind::DuplicateKey,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_insufficient_funds(&self) -> bool {
        self.kind() == ErrorKind::InsufficientFunds
    }
}

impl From<CoreError> for BusinessError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidArgument(message) => Self::InvalidArgument(message),
            CoreError::InsufficientFunds { needed, available } => {
                Self::insufficient_funds(needed, available)
            }
        }
    }
}

impl From<PersistenceError> for BusinessError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::DuplicateKey(id) => Self::DuplicateKey(id),
            PersistenceError::NotFound(id) => Self::NotFound(id),
        }
    }
}

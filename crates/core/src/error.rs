//! # Error Module
//!
//! Domain errors raised by the entities and validators.

use rust_decimal::Decimal;
use thiserror::Error;

/// Core domain errors.
///
/// Only two kinds can originate inside an entity: malformed input and a
/// withdrawal larger than the balance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Insufficient funds: need {needed}, available {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create an invalid argument error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an insufficient funds error
    pub fn insufficient_funds(needed: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds { needed, available }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CoreError::InvalidArgument(_))
    }

    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, CoreError::InsufficientFunds { .. })
    }
}

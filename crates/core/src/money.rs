//! # Money Module
//!
//! Amounts are `rust_decimal::Decimal` end to end. Nothing in the ledger
//! goes through `f32`/`f64`, so repeated deposits and withdrawals never
//! drift.

use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Whether `amount` is strictly greater than zero.
#[inline]
pub fn is_positive(amount: Decimal) -> bool {
    amount > Decimal::ZERO
}

/// Parse a user-supplied amount such as `"1000.00"` or `"0.1"`.
///
/// Only the syntax is checked here; sign rules belong to the operation.
pub fn parse_amount(raw: &str) -> CoreResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid("amount is required"));
    }

    Decimal::from_str(trimmed)
        .map_err(|e| CoreError::invalid(format!("'{}' is not a valid amount: {}", trimmed, e)))
}

/// Reject zero and negative amounts with a message naming the operation.
pub fn require_positive(amount: Decimal, operation: &str) -> CoreResult<()> {
    if is_positive(amount) {
        Ok(())
    } else {
        Err(CoreError::invalid(format!(
            "{} amount must be positive: {}",
            operation, amount
        )))
    }
}

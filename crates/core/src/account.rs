//! # Account Module
//!
//! An account owns exactly one `Client` and a non-negative `Decimal`
//! balance. The balance only moves through `deposit` and `withdraw`.

use crate::client::Client;
use crate::error::{CoreError, CoreResult};
use crate::id::AccountIdGenerator;
use crate::money;
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Bank account.
///
/// # Invariant
/// `balance >= 0` at all times. Equality is by `id`.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    id: String,
    owner: Client,
    balance: Decimal,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Open an empty account for `owner` with a freshly drawn identifier.
    pub fn open<R: Rng>(owner: Client, generator: &mut AccountIdGenerator<R>) -> Self {
        Self {
            id: generator.next_id(),
            owner,
            balance: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &Client {
        &self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Credit `amount`. Zero and negative amounts are rejected.
    pub fn deposit(&mut self, amount: Decimal) -> CoreResult<()> {
        money::require_positive(amount, "Deposit")?;
        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            CoreError::invalid(format!(
                "Deposit of {} would overflow balance {}",
                amount, self.balance
            ))
        })?;
        Ok(())
    }

    /// Debit `amount`, never below zero.
    pub fn withdraw(&mut self, amount: Decimal) -> CoreResult<()> {
        money::require_positive(amount, "Withdrawal")?;
        if amount > self.balance {
            return Err(CoreError::insufficient_funds(amount, self.balance));
        }
        self.balance = self.balance.checked_sub(amount).ok_or_else(|| {
            CoreError::invalid(format!(
                "Withdrawal of {} would overflow balance {}",
                amount, self.balance
            ))
        })?;
        Ok(())
    }

    pub fn has_sufficient_funds(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }

    /// Flat, display-ready view of the account
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            id: self.id.clone(),
            owner_name: self.owner.name().to_string(),
            tax_id: self.owner.formatted_tax_id(),
            balance: self.balance,
            created_at: self.created_at,
        }
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {} (owner: {}, balance: {})",
            self.id,
            self.owner.name(),
            self.balance
        )
    }
}

/// Read-only account view handed to presentation layers.
///
/// `balance` is the raw decimal; currency formatting is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSnapshot {
    pub id: String,
    pub owner_name: String,
    /// Formatted as `XXX.XXX.XXX-XX`
    pub tax_id: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

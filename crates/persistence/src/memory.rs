//! In-memory `AccountStore`
//!
//! Backed by a `HashMap`; nothing survives the process.

use crate::error::{PersistenceError, PersistenceResult};
use crate::store::AccountStore;
use branchbank_core::{cpf, Account};
use std::collections::HashMap;

/// HashMap-backed account store
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: HashMap<String, Account>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn save(&mut self, account: Account) -> PersistenceResult<()> {
        if self.accounts.contains_key(account.id()) {
            return Err(PersistenceError::DuplicateKey(account.id().to_string()));
        }
        tracing::debug!(account_id = account.id(), "Account stored");
        self.accounts.insert(account.id().to_string(), account);
        Ok(())
    }

    fn update(&mut self, account: Account) -> PersistenceResult<()> {
        match self.accounts.get_mut(account.id()) {
            Some(slot) => {
                *slot = account;
                Ok(())
            }
            None => Err(PersistenceError::NotFound(account.id().to_string())),
        }
    }

    fn find_by_id(&self, id: &str) -> Option<Account> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        self.accounts.get(id).cloned()
    }

    fn find_by_name(&self, name: &str) -> Vec<Account> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.accounts
            .values()
            .filter(|a| a.owner().name().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    fn find_by_tax_id(&self, tax_id: &str) -> Option<Account> {
        let tax_id = cpf::normalize(tax_id);
        if tax_id.is_empty() {
            return None;
        }
        self.accounts
            .values()
            .find(|a| a.owner().tax_id() == tax_id)
            .cloned()
    }

    fn list_all(&self) -> Vec<Account> {
        self.accounts.values().cloned().collect()
    }

    fn remove(&mut self, id: &str) -> bool {
        let id = id.trim();
        if id.is_empty() {
            return false;
        }
        self.accounts.remove(id).is_some()
    }

    fn count(&self) -> usize {
        self.accounts.len()
    }

    fn clear(&mut self) {
        self.accounts.clear();
    }

    fn exists_by_id(&self, id: &str) -> bool {
        self.accounts.contains_key(id.trim())
    }
}

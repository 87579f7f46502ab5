//! Account repository interface
//!
//! Any keyed backing store can sit behind the service by implementing
//! `AccountStore`. Lookups hand out owned snapshots; a mutated snapshot is
//! written back with `update`.

use crate::error::PersistenceResult;
use branchbank_core::Account;

/// Keyed account storage (id → Account).
///
/// The store guarantees id uniqueness only. One-account-per-tax-ID is a
/// business rule enforced above it.
pub trait AccountStore {
    /// Insert a new account. Fails with `DuplicateKey` if the id is taken.
    fn save(&mut self, account: Account) -> PersistenceResult<()>;

    /// Replace the stored state of an existing account. Fails with
    /// `NotFound` if the id is unknown.
    fn update(&mut self, account: Account) -> PersistenceResult<()>;

    /// Exact id lookup. Blank ids yield `None`.
    fn find_by_id(&self, id: &str) -> Option<Account>;

    /// Case-insensitive substring match on the owner's name. Blank input
    /// yields an empty list.
    fn find_by_name(&self, name: &str) -> Vec<Account>;

    /// Lookup by owner tax ID; punctuation in `tax_id` is ignored.
    fn find_by_tax_id(&self, tax_id: &str) -> Option<Account>;

    /// Every account, in no particular order.
    fn list_all(&self) -> Vec<Account>;

    /// Remove by id; `true` if something was removed.
    fn remove(&mut self, id: &str) -> bool;

    fn count(&self) -> usize;

    /// Drop every account.
    fn clear(&mut self);

    fn exists_by_id(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    fn exists_by_tax_id(&self, tax_id: &str) -> bool {
        self.find_by_tax_id(tax_id).is_some()
    }

    /// Every account ordered by owner name, ties broken by account id.
    fn list_all_sorted_by_owner_name(&self) -> Vec<Account> {
        let mut accounts = self.list_all();
        accounts.sort_by(|a, b| {
            a.owner()
                .name()
                .cmp(b.owner().name())
                .then_with(|| a.id().cmp(b.id()))
        });
        accounts
    }
}

//! Account service - create, deposit, withdraw, transfer, search
//!
//! The only place that combines store lookups with entity mutation. Every
//! mutating operation runs under the store write lock from its first
//! existence check to its last write, so concurrent callers can neither
//! double-spend nor mint two accounts with the same id.

use crate::config::BankConfig;
use crate::error::{BusinessError, BusinessResult};
use branchbank_core::{cpf, money, Account, AccountIdGenerator, Client};
use branchbank_persistence::{AccountStore, InMemoryAccountStore, PersistenceError};
use rand::rngs::StdRng;
use rand::Rng;
use rust_decimal::Decimal;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Account service over any `AccountStore`.
///
/// Account snapshots returned by queries are copies; later operations do
/// not change them.
pub struct AccountService<S = InMemoryAccountStore, R = StdRng> {
    store: RwLock<S>,
    ids: Mutex<AccountIdGenerator<R>>,
    config: BankConfig,
}

impl AccountService<InMemoryAccountStore, StdRng> {
    /// Service over a fresh in-memory store with default configuration
    pub fn in_memory() -> Self {
        Self::new(InMemoryAccountStore::new())
    }
}

impl<S: AccountStore> AccountService<S, StdRng> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, BankConfig::default())
    }

    /// Honors `config.id_seed` when set
    pub fn with_config(store: S, config: BankConfig) -> Self {
        let generator = match config.id_seed {
            Some(seed) => AccountIdGenerator::seeded(seed),
            None => AccountIdGenerator::from_entropy(),
        };
        Self::with_id_generator(store, config, generator)
    }
}

impl<S: AccountStore, R: Rng> AccountService<S, R> {
    pub fn with_id_generator(
        store: S,
        config: BankConfig,
        generator: AccountIdGenerator<R>,
    ) -> Self {
        Self {
            store: RwLock::new(store),
            ids: Mutex::new(generator),
            config,
        }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    // Entity mutation happens on snapshots before the store is written, so
    // a poisoned lock never guards half-applied state.
    fn read_store(&self) -> RwLockReadGuard<'_, S> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, S> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn id_generator(&self) -> MutexGuard<'_, AccountIdGenerator<R>> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open an account for a new client.
    ///
    /// A client may own only one account: a second request for the same CPF
    /// fails with `DuplicateOwner`, whatever the name.
    pub fn create_account(&self, name: &str, tax_id: &str) -> BusinessResult<Account> {
        if name.trim().is_empty() {
            return Err(BusinessError::invalid("Name is required"));
        }
        if tax_id.trim().is_empty() {
            return Err(BusinessError::invalid("CPF is required"));
        }

        let mut store = self.write_store();

        if store.exists_by_tax_id(tax_id) {
            tracing::warn!(tax_id = %cpf::format(tax_id), "Account already exists for CPF");
            return Err(BusinessError::DuplicateOwner(cpf::normalize(tax_id)));
        }

        let client = Client::new(name, tax_id)
            .map_err(|e| BusinessError::from_core_with_context(e, "failed to create account"))?;

        let mut ids = self.id_generator();
        let attempts = self.config.max_id_attempts.max(1);
        let mut last_collision = String::new();

        for attempt in 1..=attempts {
            let account = Account::open(client.clone(), &mut *ids);
            match store.save(account.clone()) {
                Ok(()) => {
                    tracing::info!(
                        account_id = account.id(),
                        owner = account.owner().name(),
                        "Account created"
                    );
                    return Ok(account);
                }
                Err(PersistenceError::DuplicateKey(id)) => {
                    tracing::debug!(attempt, account_id = %id, "Account id collision, drawing again");
                    last_collision = id;
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(attempts, "Could not draw a free account id");
        Err(BusinessError::DuplicateKey(last_collision))
    }

    /// Credit `amount` to an account
    pub fn deposit(&self, account_id: &str, amount: Decimal) -> BusinessResult<()> {
        let account_id = require_id(account_id, "Account id")?;
        money::require_positive(amount, "Deposit")?;

        let mut store = self.write_store();
        let mut account = store
            .find_by_id(account_id)
            .ok_or_else(|| BusinessError::not_found(account_id))?;

        account.deposit(amount)?;
        let balance = account.balance();
        store.update(account)?;

        tracing::info!(account_id, amount = %amount, balance = %balance, "Deposit");
        Ok(())
    }

    /// Debit `amount` from an account
    pub fn withdraw(&self, account_id: &str, amount: Decimal) -> BusinessResult<()> {
        let account_id = require_id(account_id, "Account id")?;
        money::require_positive(amount, "Withdrawal")?;

        let mut store = self.write_store();
        let mut account = store
            .find_by_id(account_id)
            .ok_or_else(|| BusinessError::not_found(account_id))?;

        if let Err(e) = account.withdraw(amount) {
            tracing::warn!(account_id, amount = %amount, error = %e, "Withdrawal rejected");
            return Err(e.into());
        }
        let balance = account.balance();
        store.update(account)?;

        tracing::info!(account_id, amount = %amount, balance = %balance, "Withdrawal");
        Ok(())
    }

    /// Move `amount` between two distinct accounts.
    ///
    /// Funds are checked before anything is touched. The source is debited
    /// before the destination is credited, and nothing is written back
    /// unless both steps succeeded. If the store rejects the credit after
    /// the debit was written, the source is written back unchanged.
    pub fn transfer(&self, from_id: &str, to_id: &str, amount: Decimal) -> BusinessResult<()> {
        let from_id = require_id(from_id, "Source account id")?;
        let to_id = require_id(to_id, "Destination account id")?;
        money::require_positive(amount, "Transfer")?;

        if from_id == to_id {
            return Err(BusinessError::invalid(
                "Source and destination accounts must differ",
            ));
        }

        let mut store = self.write_store();
        let mut source = store
            .find_by_id(from_id)
            .ok_or_else(|| BusinessError::not_found(from_id))?;
        let mut destination = store
            .find_by_id(to_id)
            .ok_or_else(|| BusinessError::not_found(to_id))?;

        if !source.has_sufficient_funds(amount) {
            tracing::warn!(
                from = from_id,
                to = to_id,
                amount = %amount,
                available = %source.balance(),
                "Transfer rejected: insufficient funds"
            );
            return Err(BusinessError::insufficient_funds(amount, source.balance()));
        }

        let original_source = source.clone();
        source.withdraw(amount)?;
        destination.deposit(amount)?;

        store.update(source)?;
        if let Err(e) = store.update(destination) {
            tracing::error!(
                from = from_id,
                to = to_id,
                error = %e,
                "Transfer credit failed, restoring source"
            );
            store.update(original_source)?;
            return Err(e.into());
        }

        tracing::info!(from = from_id, to = to_id, amount = %amount, "Transfer");
        Ok(())
    }

    pub fn find_account_by_id(&self, id: &str) -> Option<Account> {
        if id.trim().is_empty() {
            return None;
        }
        self.read_store().find_by_id(id)
    }

    /// Case-insensitive search on the owner's name
    pub fn find_accounts_by_name(&self, name: &str) -> Vec<Account> {
        let found = self.read_store().find_by_name(name);
        tracing::debug!(query = name, matches = found.len(), "Name search");
        found
    }

    /// All accounts, ordered by owner name
    pub fn list_all_accounts(&self) -> Vec<Account> {
        self.read_store().list_all_sorted_by_owner_name()
    }

    pub fn account_exists(&self, id: &str) -> bool {
        self.read_store().exists_by_id(id)
    }

    pub fn total_accounts(&self) -> usize {
        self.read_store().count()
    }

    /// Current balance; `NotFound` for unknown or blank ids
    pub fn balance_of(&self, account_id: &str) -> BusinessResult<Decimal> {
        self.find_account_by_id(account_id)
            .map(|a| a.balance())
            .ok_or_else(|| BusinessError::not_found(account_id))
    }
}

/// Trimmed id, or `InvalidArgument` naming `what` when blank.
fn require_id<'a>(id: &'a str, what: &str) -> BusinessResult<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(BusinessError::invalid(format!("{} is required", what)));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::rngs::mock::StepRng;
    use rust_decimal_macros::dec;

    const JOAO_CPF: &str = "11144477735";
    const MARIA_CPF: &str = "11122233396";
    const MISSING_ID: &str = "000000";

    fn service() -> AccountService {
        let config = BankConfig {
            id_seed: Some(42),
            ..BankConfig::default()
        };
        AccountService::with_config(InMemoryAccountStore::new(), config)
    }

    fn with_two_accounts() -> (AccountService, String, String) {
        let service = service();
        let joao = service.create_account("João Silva", JOAO_CPF).unwrap();
        let maria = service.create_account("Maria Santos", MARIA_CPF).unwrap();
        service.deposit(joao.id(), dec!(1000.00)).unwrap();
        (service, joao.id().to_string(), maria.id().to_string())
    }

    // === create_account ===

    #[test]
    fn test_create_account() {
        let service = service();
        let account = service.create_account("João Silva", JOAO_CPF).unwrap();

        assert_eq!(account.owner().name(), "João Silva");
        assert_eq!(account.owner().tax_id(), JOAO_CPF);
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.id().len(), 6);
        assert_eq!(service.total_accounts(), 1);
    }

    #[test]
    fn test_create_account_unique_ids() {
        let service = service();
        let a = service.create_account("João Silva", JOAO_CPF).unwrap();
        let b = service.create_account("Maria Santos", MARIA_CPF).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_create_account_blank_inputs() {
        let service = service();

        let err = service.create_account("", JOAO_CPF).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("Name"));

        let err = service.create_account("João Silva", "  ").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("CPF"));
        assert_eq!(service.total_accounts(), 0);
    }

    #[test]
    fn test_create_account_invalid_cpf_is_wrapped() {
        let service = service();
        let err = service.create_account("João Silva", "12345678900").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("failed to create account"));
        assert!(err.to_string().contains("CPF"));
    }

    #[test]
    fn test_create_account_duplicate_owner() {
        let service = service();
        service.create_account("João Silva", JOAO_CPF).unwrap();

        // Different name, punctuated CPF: still the same owner
        let err = service
            .create_account("João Santos", "111.444.777-35")
            .unwrap_err();
        assert_eq!(err, BusinessError::DuplicateOwner(JOAO_CPF.to_string()));
        assert_eq!(service.total_accounts(), 1);
    }

    #[test]
    fn test_create_account_retries_id_collision() {
        // The store already holds the first id this generator will draw
        let mut store = InMemoryAccountStore::new();
        let squatter = Account::open(
            Client::new("Ana Costa", "52998224725").unwrap(),
            &mut AccountIdGenerator::seeded(99),
        );
        store.save(squatter.clone()).unwrap();

        let service = AccountService::with_id_generator(
            store,
            BankConfig::default(),
            AccountIdGenerator::seeded(99),
        );
        let account = service.create_account("João Silva", JOAO_CPF).unwrap();
        assert_ne!(account.id(), squatter.id());
        assert_eq!(service.total_accounts(), 2);
    }

    #[test]
    fn test_create_account_gives_up_after_max_attempts() {
        let config = BankConfig {
            max_id_attempts: 3,
            ..BankConfig::default()
        };
        let service = AccountService::with_id_generator(
            InMemoryAccountStore::new(),
            config,
            AccountIdGenerator::from_rng(StepRng::new(0, 0)),
        );
        let first = service.create_account("João Silva", JOAO_CPF).unwrap();

        let err = service.create_account("Maria Santos", MARIA_CPF).unwrap_err();
        assert_eq!(err, BusinessError::DuplicateKey(first.id().to_string()));
        assert_eq!(service.total_accounts(), 1);
    }

    // === deposit ===

    #[test]
    fn test_deposit() {
        let (service, joao, _) = with_two_accounts();
        service.deposit(&joao, dec!(50.00)).unwrap();
        assert_eq!(service.balance_of(&joao).unwrap(), dec!(1050.00));
    }

    #[test]
    fn test_deposit_rejections() {
        let (service, joao, _) = with_two_accounts();

        let err = service.deposit(&joao, dec!(-50.00)).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("positive"));

        assert!(service.deposit(&joao, Decimal::ZERO).unwrap_err().is_invalid_argument());
        assert!(service.deposit(" ", dec!(10)).unwrap_err().is_invalid_argument());
        assert!(service.deposit(MISSING_ID, dec!(10)).unwrap_err().is_not_found());

        assert_eq!(service.balance_of(&joao).unwrap(), dec!(1000.00));
    }

    #[test]
    fn test_deposit_overflow_leaves_balance_unchanged() {
        let (service, _, maria) = with_two_accounts();
        service.deposit(&maria, Decimal::MAX).unwrap();

        let err = service.deposit(&maria, Decimal::MAX).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(service.balance_of(&maria).unwrap(), Decimal::MAX);
    }

    // === withdraw ===

    #[test]
    fn test_withdraw() {
        let (service, joao, _) = with_two_accounts();
        service.withdraw(&joao, dec!(200.00)).unwrap();
        assert_eq!(service.balance_of(&joao).unwrap(), dec!(800.00));
    }

    #[test]
    fn test_withdraw_insufficient_funds() {
        let (service, joao, _) = with_two_accounts();
        let err = service.withdraw(&joao, dec!(1500.00)).unwrap_err();
        assert_eq!(err, BusinessError::insufficient_funds(dec!(1500.00), dec!(1000.00)));
        assert_eq!(service.balance_of(&joao).unwrap(), dec!(1000.00));
    }

    #[test]
    fn test_withdraw_rejections() {
        let (service, joao, _) = with_two_accounts();
        assert!(service.withdraw(&joao, dec!(-50.00)).unwrap_err().is_invalid_argument());
        assert!(service.withdraw("", dec!(1)).unwrap_err().is_invalid_argument());
        assert!(service.withdraw(MISSING_ID, dec!(1)).unwrap_err().is_not_found());
    }

    // === transfer ===

    #[test]
    fn test_transfer() {
        let (service, joao, maria) = with_two_accounts();
        service.transfer(&joao, &maria, dec!(300.00)).unwrap();
        assert_eq!(service.balance_of(&joao).unwrap(), dec!(700.00));
        assert_eq!(service.balance_of(&maria).unwrap(), dec!(300.00));
    }

    #[test]
    fn test_transfer_to_self_rejected() {
        let (service, joao, _) = with_two_accounts();
        let err = service.transfer(&joao, &joao, dec!(100.00)).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("must differ"));

        // Padding does not make it a different account
        let padded = format!(" {} ", joao);
        assert!(service.transfer(&joao, &padded, dec!(1)).unwrap_err().is_invalid_argument());
        assert_eq!(service.balance_of(&joao).unwrap(), dec!(1000.00));
    }

    #[test]
    fn test_transfer_insufficient_funds_touches_nothing() {
        let (service, joao, maria) = with_two_accounts();
        let err = service.transfer(&joao, &maria, dec!(1500.00)).unwrap_err();
        assert!(err.is_insufficient_funds());
        assert_eq!(service.balance_of(&joao).unwrap(), dec!(1000.00));
        assert_eq!(service.balance_of(&maria).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_transfer_overflowing_destination_touches_nothing() {
        let (service, joao, maria) = with_two_accounts();
        service.deposit(&maria, Decimal::MAX).unwrap();

        let err = service.transfer(&joao, &maria, dec!(1.00)).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(service.balance_of(&joao).unwrap(), dec!(1000.00));
        assert_eq!(service.balance_of(&maria).unwrap(), Decimal::MAX);
    }

    #[test]
    fn test_transfer_missing_accounts() {
        let (service, joao, maria) = with_two_accounts();

        let err = service.transfer(MISSING_ID, &maria, dec!(100.00)).unwrap_err();
        assert_eq!(err, BusinessError::not_found(MISSING_ID));

        let err = service.transfer(&joao, MISSING_ID, dec!(100.00)).unwrap_err();
        assert_eq!(err, BusinessError::not_found(MISSING_ID));
        assert_eq!(service.balance_of(&joao).unwrap(), dec!(1000.00));
    }

    #[test]
    fn test_transfer_invalid_arguments() {
        let (service, joao, maria) = with_two_accounts();
        assert!(service.transfer("", &maria, dec!(1)).unwrap_err().is_invalid_argument());
        assert!(service.transfer(&joao, "", dec!(1)).unwrap_err().is_invalid_argument());
        assert!(service.transfer(&joao, &maria, dec!(0)).unwrap_err().is_invalid_argument());
        assert!(service.transfer(&joao, &maria, dec!(-1)).unwrap_err().is_invalid_argument());
    }

    // === queries ===

    #[test]
    fn test_find_account_by_id() {
        let (service, joao, _) = with_two_accounts();
        let found = service.find_account_by_id(&joao).unwrap();
        assert_eq!(found.id(), joao);
        assert!(service.find_account_by_id(MISSING_ID).is_none());
        assert!(service.find_account_by_id("").is_none());
    }

    #[test]
    fn test_snapshots_are_detached() {
        let (service, joao, _) = with_two_accounts();
        let before = service.find_account_by_id(&joao).unwrap();
        service.deposit(&joao, dec!(1)).unwrap();
        assert_eq!(before.balance(), dec!(1000.00));
        assert_eq!(service.balance_of(&joao).unwrap(), dec!(1001.00));
    }

    #[test]
    fn test_find_accounts_by_name() {
        let service = service();
        service.create_account("João Silva", JOAO_CPF).unwrap();
        service.create_account("Maria Silva", MARIA_CPF).unwrap();

        assert_eq!(service.find_accounts_by_name("Silva").len(), 2);
        assert_eq!(service.find_accounts_by_name("silva").len(), 2);
        assert_eq!(service.find_accounts_by_name("maria").len(), 1);
        assert!(service.find_accounts_by_name("Pereira").is_empty());
        assert!(service.find_accounts_by_name("").is_empty());
    }

    #[test]
    fn test_list_all_accounts_sorted() {
        let service = service();
        service.create_account("Maria Santos", MARIA_CPF).unwrap();
        service.create_account("Ana Costa", "52998224725").unwrap();
        service.create_account("João Silva", JOAO_CPF).unwrap();

        let names: Vec<String> = service
            .list_all_accounts()
            .iter()
            .map(|a| a.owner().name().to_string())
            .collect();
        assert_eq!(names, vec!["Ana Costa", "João Silva", "Maria Santos"]);
    }

    #[test]
    fn test_account_exists_and_total() {
        let (service, joao, maria) = with_two_accounts();
        assert!(service.account_exists(&joao));
        assert!(service.account_exists(&maria));
        assert!(!service.account_exists(MISSING_ID));
        assert_eq!(service.total_accounts(), 2);
    }

    #[test]
    fn test_balance_of_missing() {
        let service = service();
        assert!(service.balance_of(MISSING_ID).unwrap_err().is_not_found());
        assert!(service.balance_of("").unwrap_err().is_not_found());
    }

    #[test]
    fn test_seeded_config_reproduces_ids() {
        let a = service().create_account("João Silva", JOAO_CPF).unwrap();
        let b = service().create_account("João Silva", JOAO_CPF).unwrap();
        assert_eq!(a.id(), b.id());
    }
}

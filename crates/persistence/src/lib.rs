//! # Branchbank Persistence
//!
//! Storage seam for accounts.
//!
//! ## Architecture
//!
//! ```text
//! AccountService ──▶ AccountStore (trait)
//!                        └── InMemoryAccountStore (HashMap)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use branchbank_core::{Account, AccountIdGenerator, Client};
//! use branchbank_persistence::{AccountStore, InMemoryAccountStore};
//!
//! let mut store = InMemoryAccountStore::new();
//! let client = Client::new("Maria Santos", "11122233396").unwrap();
//! let account = Account::open(client, &mut AccountIdGenerator::seeded(1));
//!
//! store.save(account.clone()).unwrap();
//! assert!(store.exists_by_tax_id("111.222.333-96"));
//! ```

pub mod error;
pub mod memory;
pub mod store;

pub use error::{PersistenceError, PersistenceResult};
pub use memory::InMemoryAccountStore;
pub use store::AccountStore;

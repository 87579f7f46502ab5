//! Branchbank Core - Domain types
//!
//! This crate contains the domain entities of a single-branch ledger:
//! - `cpf`: Brazilian taxpayer ID (CPF) checksum validation
//! - `id`: 6-digit account identifier generation
//! - `money`: exact-decimal amount helpers
//! - `Client`: immutable account owner, identified by tax ID
//! - `Account`: balance holder with deposit/withdraw invariants

pub mod account;
pub mod client;
pub mod cpf;
pub mod error;
pub mod id;
pub mod money;

pub use account::{Account, AccountSnapshot};
pub use client::Client;
pub use error::{CoreError, CoreResult};
pub use id::AccountIdGenerator;

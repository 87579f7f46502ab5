//! # Branchbank Business
//!
//! Business logic layer - the `AccountService` and its configuration.

pub mod config;
pub mod error;
pub mod service;

pub use config::{BankConfig, ConfigError};
pub use error::{BusinessError, BusinessResult, ErrorKind};
pub use service::AccountService;

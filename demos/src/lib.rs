//! # Branchbank Demos
//!
//! Example scenarios driving the account service end to end.
//!
//! ## Available Examples
//!
//! 1. **01_branch_day** - Open two accounts, deposit, transfer, withdraw
//!
//! ## Running Examples
//!
//! ```bash
//! cargo run -p branchbank-demos --example 01_branch_day
//! cargo run -p branchbank-demos --example 01_branch_day -- branchbank.toml
//! RUST_LOG=debug cargo run -p branchbank-demos --example 01_branch_day
//! ```

// This crate only contains examples, no library code.

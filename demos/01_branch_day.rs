//! # Example 01: A Day at the Branch
//!
//! 1. Open accounts for João and Maria
//! 2. Deposit 1000.00 into João's account
//! 3. Transfer 300.00 from João to Maria
//! 4. Withdraw 200.00 from João
//! 5. Show what the service rejects
//!
//! Run with: `cargo run -p branchbank-demos --example 01_branch_day [config.toml]`

use anyhow::{Context, Result};
use branchbank_business::{AccountService, BankConfig};
use branchbank_core::money;
use branchbank_persistence::InMemoryAccountStore;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => BankConfig::load_file(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => BankConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let service = AccountService::with_config(InMemoryAccountStore::new(), config);

    println!("=== Example 01: A Day at the Branch ===\n");

    let joao = service
        .create_account("João Silva", "111.444.777-35")
        .context("Failed to open João's account")?;
    let maria = service
        .create_account("Maria Santos", "11122233396")
        .context("Failed to open Maria's account")?;

    println!("Opened {} for {}", joao.id(), joao.owner());
    println!("Opened {} for {}\n", maria.id(), maria.owner());

    service.deposit(joao.id(), money::parse_amount("1000.00")?)?;
    service.transfer(joao.id(), maria.id(), dec!(300.00))?;
    service.withdraw(joao.id(), dec!(200.00))?;

    for account in service.list_all_accounts() {
        println!("{}", serde_json::to_string_pretty(&account.snapshot())?);
    }

    println!("\nRejected operations:");
    let attempts = [
        ("duplicate CPF", service.create_account("João Santos", "11144477735").map(|_| ())),
        ("invalid CPF", service.create_account("Ana", "12345678900").map(|_| ())),
        ("overdraft", service.withdraw(joao.id(), dec!(10000.00))),
        ("self transfer", service.transfer(maria.id(), maria.id(), dec!(1.00))),
        ("unknown account", service.deposit("000000", dec!(1.00))),
    ];
    for (label, result) in attempts {
        if let Err(e) = result {
            println!("  {:<16} [{}] {}", label, e.kind(), e);
        }
    }

    println!(
        "\nFinal balances: João = {}, Maria = {}",
        service.balance_of(joao.id())?,
        service.balance_of(maria.id())?
    );
    tracing::info!(accounts = service.total_accounts(), "Demo finished");

    Ok(())
}

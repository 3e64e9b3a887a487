mod commands;

use anyhow::{Context, Result};
use commands::{Args, OutputFormat, Parser};
use finance_ledger::LedgerEngine;
use std::fs::File;

fn main() -> Result<()> {
    // Parse the CLI arguments
    let args = Args::parse();

    // Initialize logger with default level of info (can be overridden with RUST_LOG)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut engine = LedgerEngine::new();

    // 1. Register the accounts
    log::info!("Importing accounts from {}", args.accounts_file.display());
    let file = File::open(&args.accounts_file).with_context(|| {
        format!(
            "Failed to open accounts file: {}",
            args.accounts_file.display()
        )
    })?;
    engine
        .import_accounts(file)
        .context("Failed to import accounts")?;

    // 2. Attach their transactions, if any
    if let Some(path) = &args.transactions_file {
        log::info!("Importing transactions from {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Failed to open transactions file: {}", path.display()))?;
        engine
            .import_transactions(file)
            .context("Failed to import transactions")?;
    }

    // 3. Export to stdout
    match args.format {
        OutputFormat::Csv => engine
            .export_balances(std::io::stdout())
            .context("Failed to export balances to stdout")?,
        OutputFormat::Json => engine
            .export_statements_json(std::io::stdout())
            .context("Failed to export statements to stdout")?,
    }

    log::info!("Export complete");

    Ok(())
}

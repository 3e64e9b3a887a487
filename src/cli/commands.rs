pub(crate) use clap::Parser;
use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "finance-ledger",
    author,
    version,
    about = "An in-memory personal finance ledger",
    long_about = None,
    after_help = "OUTPUT:\n    Results are printed to stdout.\n    Use shell redirection to save to a file:\n\n    finance-ledger accounts.csv --transactions transactions.csv > balances.csv"
)]
pub struct Args {
    /// Path to the input accounts CSV file
    #[arg(
        index = 1,
        value_name = "ACCOUNTS",
        help = "Input CSV file with columns: name, national_id, email, age"
    )]
    pub accounts_file: PathBuf,

    /// Path to the input transactions CSV file
    #[arg(
        short,
        long = "transactions",
        value_name = "FILE",
        help = "Input CSV file with columns: account (email), title, value, type"
    )]
    pub transactions_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One balance row per account
    Csv,
    /// Every account with its transactions and balance
    Json,
}

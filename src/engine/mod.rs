//! Ledger engine module.
//!
//! This module contains the in-memory ledger:
//! - `AccountStore` - Account registry, identity and uniqueness rules
//! - `LedgerEngine` - Per-account transaction bookkeeping, balances and batch I/O
//! - `SharedLedger` - `LedgerEngine` behind a single store-wide lock
//! - `Account`, `Transaction`, `Balance` - The records handed back to callers
//! - `Error` types - Validation, domain and I/O errors

mod account;
mod account_store;
mod balance;
mod error;
mod ledger_engine;
mod shared;
mod transaction;

pub use rust_decimal::Decimal;

pub use account::{Account, AccountId, AccountRecord, AccountSummary, NewAccount};
pub use account_store::AccountStore;
pub use balance::{Balance, Statement};
pub use error::{Error, LedgerError, RecordError, UniqueKey};
pub use ledger_engine::{ImportSummary, LedgerEngine};
pub use shared::SharedLedger;
pub use transaction::{NewTransaction, Transaction, TransactionId, TransactionKind, TransactionRecord};

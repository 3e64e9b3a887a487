use crate::engine::account::{AccountId, AccountRecord};
use crate::engine::transaction::{TransactionId, TransactionRecord};

/// Top-level error type for batch import/export.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record error: {0}")]
    Record(#[from] RecordError),
}

/// Errors during raw record -> validated input conversion (hard errors).
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Invalid account: {0}")]
    InvalidAccount(AccountRecord),
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(TransactionRecord),
}

/// The unique keys an account is registered under, besides its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    NationalId,
    Email,
}

impl std::fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniqueKey::NationalId => write!(f, "national id"),
            UniqueKey::Email => write!(f, "email"),
        }
    }
}

/// Domain errors raised by the ledger itself.
/// These reflect caller mistakes, never transient faults, so nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Account {account} not found")]
    AccountNotFound { account: AccountId },

    #[error("Transaction {transaction} not found in account {account}")]
    TransactionNotFound {
        account: AccountId,
        transaction: TransactionId,
    },

    #[error("An account with {key} {value} is already registered")]
    DuplicateKey { key: UniqueKey, value: String },

    #[error("Transaction {transaction} would overflow the balance of account {account}")]
    BalanceOverflow {
        account: AccountId,
        transaction: TransactionId,
    },
}

impl LedgerError {
    /// True for both the account and the transaction flavour of "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::AccountNotFound { .. } | LedgerError::TransactionNotFound { .. }
        )
    }

    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, LedgerError::DuplicateKey { .. })
    }
}

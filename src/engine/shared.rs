use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::account::{Account, AccountId, NewAccount};
use super::balance::Balance;
use super::error::LedgerError;
use super::ledger_engine::LedgerEngine;
use super::transaction::{NewTransaction, Transaction, TransactionId};

/// Thread-safe handle to a single `LedgerEngine`.
///
/// One lock guards the whole store: account deletion and transaction
/// mutation touch the same nested sequences. Mutations take the write lock,
/// reads share the read lock. Records are handed out as owned clones.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<LedgerEngine>>,
}

impl SharedLedger {
    pub fn new(engine: LedgerEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    // Poisoned locks are recovered.
    fn read_guard(&self) -> RwLockReadGuard<'_, LedgerEngine> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, LedgerEngine> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` under the shared read lock.
    pub fn read<T>(&self, f: impl FnOnce(&LedgerEngine) -> T) -> T {
        f(&self.read_guard())
    }

    /// Run `f` under the exclusive write lock.
    pub fn write<T>(&self, f: impl FnOnce(&mut LedgerEngine) -> T) -> T {
        f(&mut self.write_guard())
    }

    pub fn create_account(&self, fields: NewAccount) -> Result<Account, LedgerError> {
        self.write(|engine| engine.accounts_mut().create(fields).cloned())
    }

    pub fn get_account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.read(|engine| engine.accounts().get(id).cloned())
    }

    pub fn list_accounts(&self) -> Vec<Account> {
        self.read(|engine| engine.accounts().list().cloned().collect())
    }

    pub fn update_account(&self, id: AccountId, fields: NewAccount) -> Result<Account, LedgerError> {
        self.write(|engine| engine.accounts_mut().update(id, fields).cloned())
    }

    pub fn delete_account(&self, id: AccountId) -> Option<Account> {
        self.write(|engine| engine.accounts_mut().delete(id))
    }

    pub fn add_transaction(
        &self,
        account_id: AccountId,
        fields: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        self.write(|engine| engine.add_transaction(account_id, fields).cloned())
    }

    pub fn get_transaction(
        &self,
        account_id: AccountId,
        transaction_id: TransactionId,
    ) -> Result<Transaction, LedgerError> {
        self.read(|engine| engine.get_transaction(account_id, transaction_id).cloned())
    }

    pub fn list_transactions_with_balance(
        &self,
        account_id: AccountId,
    ) -> Result<(Vec<Transaction>, Balance), LedgerError> {
        self.read(|engine| -> Result<_, LedgerError> {
            let statement = engine.list_transactions_with_balance(account_id)?;
            Ok((statement.transactions.to_vec(), statement.balance))
        })
    }

    pub fn update_transaction(
        &self,
        account_id: AccountId,
        transaction_id: TransactionId,
        fields: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        self.write(|engine| {
            engine
                .update_transaction(account_id, transaction_id, fields)
                .cloned()
        })
    }

    pub fn delete_transaction(
        &self,
        account_id: AccountId,
        transaction_id: TransactionId,
    ) -> Result<Transaction, LedgerError> {
        self.write(|engine| engine.delete_transaction(account_id, transaction_id))
    }
}

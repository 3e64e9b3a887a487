use std::collections::HashMap;

use uuid::Uuid;

use super::account::{Account, AccountId, AccountSummary, NewAccount};
use super::error::{LedgerError, UniqueKey};

/// Registry of every account, keyed by id and kept in insertion order.
///
/// Enforces the identity invariants: ids are generated here and never reused,
/// and no two accounts share a national id or an email at creation time.
#[derive(Debug, Default)]
pub struct AccountStore {
    /// Maps account ID to the account and its transactions
    accounts: HashMap<AccountId, Account>,
    /// Account IDs in insertion order
    order: Vec<AccountId>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account with no transactions.
    ///
    /// The national id is checked before the email, so a record colliding on
    /// both reports the national id.
    pub fn create(&mut self, fields: NewAccount) -> Result<&Account, LedgerError> {
        if self.find_by_national_id(fields.national_id()).is_some() {
            return Err(LedgerError::DuplicateKey {
                key: UniqueKey::NationalId,
                value: fields.national_id().to_owned(),
            });
        }
        if self.find_by_email(fields.email()).is_some() {
            return Err(LedgerError::DuplicateKey {
                key: UniqueKey::Email,
                value: fields.email().to_owned(),
            });
        }

        let id = Uuid::new_v4();
        log::debug!("[account] created {id} ({})", fields.email());
        self.order.push(id);
        let account = self
            .accounts
            .entry(id)
            .or_insert_with(|| Account::new(id, fields));
        Ok(&*account)
    }

    pub fn get(&self, id: AccountId) -> Result<&Account, LedgerError> {
        self.accounts
            .get(&id)
            .ok_or(LedgerError::AccountNotFound { account: id })
    }

    pub(super) fn get_mut(&mut self, id: AccountId) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(&id)
            .ok_or(LedgerError::AccountNotFound { account: id })
    }

    /// All accounts in insertion order. Call again to restart.
    pub fn list(&self) -> impl Iterator<Item = &Account> + '_ {
        self.order.iter().filter_map(|id| self.accounts.get(id))
    }

    /// Like `list`, without the transactions.
    pub fn summaries(&self) -> impl Iterator<Item = AccountSummary> + '_ {
        self.list().map(Account::summary)
    }

    /// Replace every scalar field of an account, keeping its id and transactions.
    ///
    /// National id and email are not re-checked against the other accounts.
    pub fn update(&mut self, id: AccountId, fields: NewAccount) -> Result<&Account, LedgerError> {
        let account = self.get_mut(id)?;
        account.replace_details(fields);
        log::trace!("[account] updated {id}");
        Ok(&*account)
    }

    /// Remove an account along with all of its transactions.
    /// Unknown ids are ignored.
    pub fn delete(&mut self, id: AccountId) -> Option<Account> {
        let removed = self.accounts.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        log::debug!(
            "[account] deleted {id} with {} transactions",
            removed.transaction_count()
        );
        Some(removed)
    }

    pub fn find_by_national_id(&self, national_id: &str) -> Option<&Account> {
        self.accounts
            .values()
            .find(|account| account.national_id() == national_id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.values().find(|account| account.email() == email)
    }

    /// Returns the number of accounts in the store
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

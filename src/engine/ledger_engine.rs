use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::{Account, AccountId, AccountRecord, AccountSummary, NewAccount};
use super::account_store::AccountStore;
use super::balance::{Balance, Statement};
use super::error::{Error, LedgerError};
use super::transaction::{
    serialize_amount, NewTransaction, Transaction, TransactionId, TransactionRecord,
};
use super::Decimal;

/// The ledger: transaction bookkeeping on top of an `AccountStore`.
///
/// Every transaction operation first resolves the owning account through the
/// store, then works on that account's transaction sequence only.
#[derive(Debug, Default)]
pub struct LedgerEngine {
    accounts: AccountStore,
}

impl LedgerEngine {
    /// Create a new `LedgerEngine` with an empty account store
    pub fn new() -> Self {
        log::trace!("LedgerEngine initialized");
        Self::default()
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    /// Account CRUD goes through the store directly.
    pub fn accounts_mut(&mut self) -> &mut AccountStore {
        &mut self.accounts
    }

    /// Append a new transaction to the end of an account's sequence.
    ///
    /// Fails with `BalanceOverflow` if the account's sums would leave the
    /// `Decimal` range; the account is left unchanged.
    pub fn add_transaction(
        &mut self,
        account_id: AccountId,
        fields: NewTransaction,
    ) -> Result<&Transaction, LedgerError> {
        let account = self.accounts.get_mut(account_id)?;
        let transaction = Transaction::new(Uuid::new_v4(), fields);
        let candidate = account.transactions().iter().chain(std::iter::once(&transaction));
        if Balance::checked_from_transactions(candidate).is_none() {
            return Err(LedgerError::BalanceOverflow {
                account: account_id,
                transaction: transaction.id(),
            });
        }
        log::debug!("[transaction] account={account_id} added {transaction}");
        Ok(account.push_transaction(transaction))
    }

    pub fn get_transaction(
        &self,
        account_id: AccountId,
        transaction_id: TransactionId,
    ) -> Result<&Transaction, LedgerError> {
        self.accounts
            .get(account_id)?
            .transaction(transaction_id)
            .ok_or(LedgerError::TransactionNotFound {
                account: account_id,
                transaction: transaction_id,
            })
    }

    /// All transactions of an account, in the order they were added, plus their balance.
    pub fn list_transactions_with_balance(
        &self,
        account_id: AccountId,
    ) -> Result<Statement<'_>, LedgerError> {
        let account = self.accounts.get(account_id)?;
        let statement = Statement::new(account.transactions());
        log::trace!(
            "[statement] account={account_id} transactions={} total={}",
            statement.transactions.len(),
            statement.balance.total()
        );
        Ok(statement)
    }

    /// Replace title, value and kind of a transaction, keeping its id.
    ///
    /// Fails with `BalanceOverflow`, leaving the transaction untouched, if the
    /// new value would push the account's sums out of the `Decimal` range.
    pub fn update_transaction(
        &mut self,
        account_id: AccountId,
        transaction_id: TransactionId,
        fields: NewTransaction,
    ) -> Result<&Transaction, LedgerError> {
        let account = self.accounts.get_mut(account_id)?;
        let replacement = Transaction::new(transaction_id, fields.clone());
        let candidate = account.transactions().iter().map(|existing| {
            if existing.id() == transaction_id {
                &replacement
            } else {
                existing
            }
        });
        if Balance::checked_from_transactions(candidate).is_none() {
            return Err(LedgerError::BalanceOverflow {
                account: account_id,
                transaction: transaction_id,
            });
        }

        let transaction = account
            .transaction_mut(transaction_id)
            .ok_or(LedgerError::TransactionNotFound {
                account: account_id,
                transaction: transaction_id,
            })?;
        transaction.replace(fields);
        log::trace!("[transaction] account={account_id} updated {transaction}");
        Ok(&*transaction)
    }

    /// Remove exactly one transaction from its owning account.
    pub fn delete_transaction(
        &mut self,
        account_id: AccountId,
        transaction_id: TransactionId,
    ) -> Result<Transaction, LedgerError> {
        let removed = self
            .accounts
            .get_mut(account_id)?
            .remove_transaction(transaction_id)
            .ok_or(LedgerError::TransactionNotFound {
                account: account_id,
                transaction: transaction_id,
            })?;
        log::debug!("[transaction] account={account_id} deleted {removed}");
        Ok(removed)
    }
}

// =============================================================================
// Batch import / export
// =============================================================================

/// Outcome of a batch import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows applied to the ledger
    pub applied: u64,
    /// Rows rejected by a ledger rule (duplicate key, unknown account, balance overflow)
    pub skipped: u64,
}

impl ImportSummary {
    fn record(&mut self, row_num: u64, result: Result<(), LedgerError>) {
        match result {
            Ok(()) => self.applied += 1,
            Err(e) => {
                log::warn!("[row {row_num}] - Skipped: {e}");
                self.skipped += 1;
            }
        }
    }
}

/// A transaction row, addressed to its account by email.
#[derive(Debug, Deserialize)]
struct TransactionRow {
    account: String,
    title: Option<String>,
    value: Option<Decimal>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl TransactionRow {
    fn into_parts(self) -> (String, TransactionRecord) {
        let record = TransactionRecord {
            title: self.title,
            value: self.value,
            kind: self.kind,
        };
        (self.account, record)
    }
}

#[derive(Debug, Serialize)]
struct BalanceRow<'a> {
    id: AccountId,
    name: &'a str,
    email: &'a str,
    #[serde(serialize_with = "serialize_amount")]
    income: Decimal,
    #[serde(serialize_with = "serialize_amount")]
    outcome: Decimal,
    #[serde(serialize_with = "serialize_amount")]
    total: Decimal,
}

#[derive(Debug, Serialize)]
struct AccountStatement<'a> {
    account: AccountSummary,
    #[serde(flatten)]
    statement: Statement<'a>,
}

fn build_csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All) // trim whitespace from fields
        .from_reader(reader)
}

impl LedgerEngine {
    /// Register accounts from CSV rows `name,national_id,email,age`.
    ///
    /// Malformed rows abort the import. Rows colliding with an existing
    /// national id or email are logged and skipped.
    /// The CSV reader is buffered already, do not wrap `reader` in a `BufReader`.
    pub fn import_accounts<R: Read>(&mut self, reader: R) -> Result<ImportSummary, Error> {
        log::info!("Starting account import");
        let mut summary = ImportSummary::default();

        let mut csv_reader = build_csv_reader(reader);
        for (row_num, result) in (1u64..).zip(csv_reader.deserialize()) {
            let record: AccountRecord = result?;
            log::trace!("[row {row_num}] Parsing account: {record}");

            let fields = NewAccount::try_from(record)?;
            summary.record(row_num, self.accounts.create(fields).map(|_| ()));
        }

        log::info!(
            "Account import complete: {} applied, {} skipped, {} accounts",
            summary.applied,
            summary.skipped,
            self.accounts.len()
        );
        Ok(summary)
    }

    /// Add transactions from CSV rows `account,title,value,type`, where
    /// `account` is the owner's email.
    ///
    /// Malformed rows abort the import. Rows naming an unknown account are
    /// logged and skipped.
    pub fn import_transactions<R: Read>(&mut self, reader: R) -> Result<ImportSummary, Error> {
        log::info!("Starting transaction import");
        let mut summary = ImportSummary::default();

        let mut csv_reader = build_csv_reader(reader);
        for (row_num, result) in (1u64..).zip(csv_reader.deserialize()) {
            let row: TransactionRow = result?;
            let (email, record) = row.into_parts();
            log::trace!("[row {row_num}] Parsing transaction for {email}: {record}");

            let fields = NewTransaction::try_from(record)?;
            let outcome = match self.accounts.find_by_email(&email).map(Account::id) {
                Some(account_id) => self.add_transaction(account_id, fields).map(|_| ()),
                None => {
                    log::warn!("[row {row_num}] - Skipped: no account with email {email}");
                    summary.skipped += 1;
                    continue;
                }
            };
            summary.record(row_num, outcome);
        }

        log::info!(
            "Transaction import complete: {} applied, {} skipped",
            summary.applied,
            summary.skipped
        );
        Ok(summary)
    }

    /// Write one CSV row per account, in insertion order:
    /// `id,name,email,income,outcome,total`.
    pub fn export_balances<W: Write>(&self, writer: W) -> Result<(), Error> {
        log::info!("Exporting balances of {} accounts", self.accounts.len());

        let mut csv_writer = csv::Writer::from_writer(writer);
        for account in self.accounts.list() {
            let balance = Balance::from_transactions(account.transactions());
            csv_writer.serialize(BalanceRow {
                id: account.id(),
                name: account.name(),
                email: account.email(),
                income: balance.income(),
                outcome: balance.outcome(),
                total: balance.total(),
            })?;
        }
        csv_writer.flush()?;

        log::trace!("Balance export complete");
        Ok(())
    }

    /// Write every account with its transactions and balance as a JSON array.
    pub fn export_statements_json<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        log::info!("Exporting statements of {} accounts", self.accounts.len());

        let statements: Vec<_> = self
            .accounts
            .list()
            .map(|account| AccountStatement {
                account: account.summary(),
                statement: Statement::new(account.transactions()),
            })
            .collect();
        serde_json::to_writer_pretty(&mut writer, &statements)?;
        writeln!(writer)?;
        writer.flush()?;

        log::trace!("Statement export complete");
        Ok(())
    }
}

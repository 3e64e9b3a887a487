use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::error::RecordError;
use crate::engine::transaction::{Transaction, TransactionId};

pub type AccountId = Uuid;

/// Raw account body as received from a caller (CSV row, request body, ...).
/// This is the unvalidated form that needs conversion to a `NewAccount`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub name: Option<String>,
    pub national_id: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
}

impl std::fmt::Display for AccountRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "name={:?} national_id={:?} email={:?} age={:?}",
            self.name, self.national_id, self.email, self.age
        )
    }
}

/// Validated account fields, used for both creation and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    name: String,
    national_id: String,
    email: String,
    age: u32,
}

impl NewAccount {
    /// Shortcut for building and validating an `AccountRecord` in one go.
    pub fn new(
        name: impl Into<String>,
        national_id: impl Into<String>,
        email: impl Into<String>,
        age: u32,
    ) -> Result<Self, RecordError> {
        Self::try_from(AccountRecord {
            name: Some(name.into()),
            national_id: Some(national_id.into()),
            email: Some(email.into()),
            age: Some(age),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> u32 {
        self.age
    }
}

/// Trimmed, non-empty view of an optional field.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl TryFrom<AccountRecord> for NewAccount {
    type Error = RecordError;

    fn try_from(record: AccountRecord) -> Result<Self, Self::Error> {
        let fields = (
            present(record.name.as_deref()),
            present(record.national_id.as_deref()),
            present(record.email.as_deref()),
            record.age,
        );
        match fields {
            (Some(name), Some(national_id), Some(email), Some(age)) if age > 0 => Ok(NewAccount {
                name: name.to_owned(),
                national_id: national_id.to_owned(),
                email: email.to_owned(),
                age,
            }),
            _ => Err(RecordError::InvalidAccount(record)),
        }
    }
}

/// An account holder together with the transactions it exclusively owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    id: AccountId,
    name: String,
    national_id: String,
    email: String,
    age: u32,
    transactions: Vec<Transaction>,
}

impl Account {
    pub(super) fn new(id: AccountId, fields: NewAccount) -> Self {
        Self {
            id,
            name: fields.name,
            national_id: fields.national_id,
            email: fields.email,
            age: fields.age,
            transactions: Vec::new(),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Transactions in the order they were added
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    /// The account without its transactions.
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            name: self.name.clone(),
            national_id: self.national_id.clone(),
            email: self.email.clone(),
            age: self.age,
        }
    }

    /// Replace every scalar field. The id and the transactions are kept.
    pub(super) fn replace_details(&mut self, fields: NewAccount) {
        self.name = fields.name;
        self.national_id = fields.national_id;
        self.email = fields.email;
        self.age = fields.age;
    }

    pub(super) fn push_transaction(&mut self, transaction: Transaction) -> &Transaction {
        self.transactions.push(transaction);
        &self.transactions[self.transactions.len() - 1]
    }

    pub(super) fn transaction_mut(&mut self, id: TransactionId) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|t| t.id() == id)
    }

    /// Remove exactly the matching transaction, keeping the order of the rest.
    pub(super) fn remove_transaction(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|t| t.id() == id)?;
        Some(self.transactions.remove(index))
    }
}

/// Account fields without the transaction history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub name: String,
    pub national_id: String,
    pub email: String,
    pub age: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::transaction::NewTransaction;
    use rust_decimal_macros::dec;

    fn make_record() -> AccountRecord {
        AccountRecord {
            name: Some("Maria".into()),
            national_id: Some("123.456.789-00".into()),
            email: Some("maria@example.com".into()),
            age: Some(31),
        }
    }

    fn make_account() -> Account {
        let fields = NewAccount::try_from(make_record()).unwrap();
        Account::new(Uuid::new_v4(), fields)
    }

    fn make_transaction(title: &str) -> Transaction {
        let fields = NewTransaction::new(title, dec!(10), "income").unwrap();
        Transaction::new(Uuid::new_v4(), fields)
    }

    #[test]
    fn test_valid_account_record() {
        let fields = NewAccount::try_from(make_record()).unwrap();

        assert_eq!(fields.name(), "Maria");
        assert_eq!(fields.national_id(), "123.456.789-00");
        assert_eq!(fields.email(), "maria@example.com");
        assert_eq!(fields.age(), 31);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let record = AccountRecord {
            name: Some("  Maria ".into()),
            ..make_record()
        };
        let fields = NewAccount::try_from(record).unwrap();
        assert_eq!(fields.name(), "Maria");
    }

    #[test]
    fn test_rejects_missing_fields() {
        let records = [
            AccountRecord { name: None, ..make_record() },
            AccountRecord { national_id: None, ..make_record() },
            AccountRecord { email: None, ..make_record() },
            AccountRecord { age: None, ..make_record() },
        ];

        for record in records {
            assert!(NewAccount::try_from(record.clone()).is_err(), "Should reject: {record}");
        }
    }

    #[test]
    fn test_rejects_blank_strings() {
        let record = AccountRecord {
            email: Some("   ".into()),
            ..make_record()
        };
        assert!(NewAccount::try_from(record).is_err());
    }

    #[test]
    fn test_rejects_zero_age() {
        let record = AccountRecord {
            age: Some(0),
            ..make_record()
        };
        assert!(NewAccount::try_from(record).is_err());
    }

    #[test]
    fn test_new_account_has_no_transactions() {
        let account = make_account();
        assert!(account.transactions().is_empty());
        assert_eq!(account.transaction_count(), 0);
    }

    #[test]
    fn test_replace_details_keeps_id_and_transactions() {
        let mut account = make_account();
        let id = account.id();
        account.push_transaction(make_transaction("salary"));

        let fields = NewAccount::new("Ana", "999", "ana@example.com", 40).unwrap();
        account.replace_details(fields);

        assert_eq!(account.id(), id);
        assert_eq!(account.name(), "Ana");
        assert_eq!(account.national_id(), "999");
        assert_eq!(account.email(), "ana@example.com");
        assert_eq!(account.age(), 40);
        assert_eq!(account.transaction_count(), 1);
    }

    #[test]
    fn test_remove_transaction_keeps_order_of_the_rest() {
        let mut account = make_account();
        let first = account.push_transaction(make_transaction("a")).id();
        let second = account.push_transaction(make_transaction("b")).id();
        let third = account.push_transaction(make_transaction("c")).id();

        let removed = account.remove_transaction(second).unwrap();
        assert_eq!(removed.id(), second);

        let ids: Vec<_> = account.transactions().iter().map(Transaction::id).collect();
        assert_eq!(ids, vec![first, third]);
        assert!(account.remove_transaction(second).is_none());
    }

    #[test]
    fn test_summary_omits_transactions() {
        let mut account = make_account();
        account.push_transaction(make_transaction("salary"));

        let summary = account.summary();
        assert_eq!(summary.id, account.id());
        assert_eq!(summary.email, "maria@example.com");
    }
}

use serde::Serialize;

use super::Decimal;
use crate::engine::transaction::{serialize_amount, Transaction, TransactionKind};

/// Aggregate of an account's transactions.
///
/// `income` and `outcome` sum the values of the matching kinds, `total` is
/// `income - outcome`. Transactions of any other kind are ignored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Balance {
    #[serde(serialize_with = "serialize_amount")]
    income: Decimal,
    #[serde(serialize_with = "serialize_amount")]
    outcome: Decimal,
    #[serde(serialize_with = "serialize_amount")]
    total: Decimal,
}

impl Balance {
    /// Fold a transaction sequence into a balance, visiting each entry once.
    ///
    /// Sums saturate at `Decimal::MAX`. `LedgerEngine` never stores a
    /// sequence whose sums overflow, see `checked_from_transactions`.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut balance = transactions
            .into_iter()
            .fold(Balance::default(), |mut acc, transaction| {
                let value = transaction.value();
                match transaction.kind() {
                    TransactionKind::Income => {
                        acc.income = acc.income.saturating_add(value);
                        acc.total = acc.total.saturating_add(value);
                    }
                    TransactionKind::Outcome => {
                        acc.outcome = acc.outcome.saturating_add(value);
                        acc.total = acc.total.saturating_sub(value);
                    }
                    TransactionKind::Other(label) => {
                        log::trace!("[balance] tx={} kind={label} ignored", transaction.id());
                    }
                }
                acc
            });
        balance.normalize();
        balance
    }

    /// Like `from_transactions`, but `None` as soon as a sum leaves the `Decimal` range.
    pub fn checked_from_transactions<'a, I>(transactions: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut balance = Balance::default();
        for transaction in transactions {
            let value = transaction.value();
            match transaction.kind() {
                TransactionKind::Income => {
                    balance.income = balance.income.checked_add(value)?;
                    balance.total = balance.total.checked_add(value)?;
                }
                TransactionKind::Outcome => {
                    balance.outcome = balance.outcome.checked_add(value)?;
                    balance.total = balance.total.checked_sub(value)?;
                }
                TransactionKind::Other(_) => {}
            }
        }
        balance.normalize();
        #[cfg(debug_assertions)]
        balance.assert_invariant();
        Some(balance)
    }

    /// Sum of income transactions
    pub fn income(&self) -> Decimal {
        self.income
    }

    /// Sum of outcome transactions
    pub fn outcome(&self) -> Decimal {
        self.outcome
    }

    /// Net result, `income - outcome`
    pub fn total(&self) -> Decimal {
        self.total
    }

    fn normalize(&mut self) {
        self.income = self.income.normalize();
        self.outcome = self.outcome.normalize();
        self.total = self.total.normalize();
    }

    #[cfg(debug_assertions)]
    fn assert_invariant(&self) {
        debug_assert_eq!(
            self.total,
            self.income - self.outcome,
            "Invariant violated: total ({}) != income ({}) - outcome ({})",
            self.total,
            self.income,
            self.outcome
        );
        debug_assert!(self.income >= Decimal::ZERO && self.outcome >= Decimal::ZERO);
    }
}

/// An account's transactions along with their balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement<'a> {
    pub transactions: &'a [Transaction],
    pub balance: Balance,
}

impl<'a> Statement<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self {
            transactions,
            balance: Balance::from_transactions(transactions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::transaction::NewTransaction;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn make_transactions(entries: &[(Decimal, &str)]) -> Vec<Transaction> {
        entries
            .iter()
            .map(|(value, kind)| {
                let fields = NewTransaction::new("entry", *value, *kind).unwrap();
                Transaction::new(Uuid::new_v4(), fields)
            })
            .collect()
    }

    #[test]
    fn test_empty_balance_is_zero() {
        let balance = Balance::from_transactions(std::iter::empty());
        assert_eq!(balance, Balance::default());
        assert_eq!(balance.total(), Decimal::ZERO);
    }

    #[test]
    fn test_income_and_outcome_are_summed() {
        let transactions = make_transactions(&[
            (dec!(1200), "income"),
            (dec!(1000), "outcome"),
            (dec!(300), "income"),
        ]);
        let balance = Balance::from_transactions(&transactions);

        assert_eq!(balance.income(), dec!(1500));
        assert_eq!(balance.outcome(), dec!(1000));
        assert_eq!(balance.total(), dec!(500));
    }

    #[test]
    fn test_total_can_go_negative() {
        let transactions = make_transactions(&[(dec!(10), "income"), (dec!(25.5), "outcome")]);
        let balance = Balance::from_transactions(&transactions);

        assert_eq!(balance.total(), dec!(-15.5));
        assert_eq!(balance.total(), balance.income() - balance.outcome());
    }

    #[test]
    fn test_other_kinds_contribute_nothing() {
        let transactions = make_transactions(&[
            (dec!(100), "income"),
            (dec!(999), "transfer"),
            (dec!(40), "outcome"),
        ]);
        let balance = Balance::from_transactions(&transactions);

        assert_eq!(balance.income(), dec!(100));
        assert_eq!(balance.outcome(), dec!(40));
        assert_eq!(balance.total(), dec!(60));
    }

    #[test]
    fn test_checked_balance_detects_overflow() {
        let transactions =
            make_transactions(&[(Decimal::MAX, "income"), (Decimal::MAX, "income")]);

        assert!(Balance::checked_from_transactions(&transactions).is_none());
        // saturates instead of panicking
        assert_eq!(Balance::from_transactions(&transactions).income(), Decimal::MAX);
    }

    #[test]
    fn test_checked_balance_matches_plain_balance() {
        let transactions = make_transactions(&[
            (Decimal::MAX, "income"),
            (Decimal::MAX, "outcome"),
            (dec!(3), "transfer"),
        ]);
        let balance = Balance::checked_from_transactions(&transactions).unwrap();

        assert_eq!(balance, Balance::from_transactions(&transactions));
        assert_eq!(balance.total(), Decimal::ZERO);
    }

    #[test]
    fn test_statement_serializes_transactions_and_balance() {
        let transactions = make_transactions(&[(dec!(1.50), "income")]);
        let statement = Statement::new(&transactions);
        let json = serde_json::to_value(&statement).unwrap();

        assert_eq!(json["transactions"].as_array().unwrap().len(), 1);
        assert_eq!(json["balance"]["income"], "1.5");
        assert_eq!(json["balance"]["outcome"], "0");
        assert_eq!(json["balance"]["total"], "1.5");
    }
}

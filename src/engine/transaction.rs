use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::Decimal;
use crate::engine::error::RecordError;

pub type TransactionId = Uuid;

/// Serialize an amount as a normalized decimal string (no trailing zeros)
pub(crate) fn serialize_amount<S: Serializer>(
    value: &Decimal,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.normalize().to_string())
}

/// Which side of the balance a transaction counts on.
///
/// Only `income` and `outcome` have defined semantics. Any other label is kept
/// verbatim and contributes to neither side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    Income,
    Outcome,
    Other(String),
}

impl TransactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Outcome => "outcome",
            TransactionKind::Other(label) => label,
        }
    }
}

impl From<String> for TransactionKind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "income" => TransactionKind::Income,
            "outcome" => TransactionKind::Outcome,
            _ => TransactionKind::Other(label),
        }
    }
}

impl From<&str> for TransactionKind {
    fn from(label: &str) -> Self {
        TransactionKind::from(label.to_owned())
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw transaction body as received from a caller.
/// This is the unvalidated form that needs conversion to a `NewTransaction`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub title: Option<String>,
    pub value: Option<Decimal>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl std::fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value {
            Some(value) => write!(
                f,
                "title={:?} value={} type={:?}",
                self.title, value, self.kind
            ),
            None => write!(f, "title={:?} type={:?}", self.title, self.kind),
        }
    }
}

/// Validated transaction fields, used for both creation and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    title: String,
    value: Decimal,
    kind: TransactionKind,
}

impl NewTransaction {
    pub fn new(
        title: impl Into<String>,
        value: Decimal,
        kind: impl Into<String>,
    ) -> Result<Self, RecordError> {
        Self::try_from(TransactionRecord {
            title: Some(title.into()),
            value: Some(value),
            kind: Some(kind.into()),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }
}

impl TryFrom<TransactionRecord> for NewTransaction {
    type Error = RecordError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let title = record.title.as_deref().map(str::trim).filter(|t| !t.is_empty());
        let kind = record.kind.as_deref().map(str::trim).filter(|k| !k.is_empty());
        match (title, record.value, kind) {
            (Some(title), Some(value), Some(kind)) if value >= Decimal::ZERO => Ok(NewTransaction {
                title: title.to_owned(),
                value: value.normalize(),
                kind: TransactionKind::from(kind),
            }),
            _ => Err(RecordError::InvalidTransaction(record)),
        }
    }
}

/// A single ledger entry owned by exactly one account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    title: String,
    #[serde(serialize_with = "serialize_amount")]
    value: Decimal,
    #[serde(rename = "type")]
    kind: TransactionKind,
}

impl Transaction {
    pub(super) fn new(id: TransactionId, fields: NewTransaction) -> Self {
        Self {
            id,
            title: fields.title,
            value: fields.value,
            kind: fields.kind,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    /// Replace title, value and kind in place. The id never changes.
    pub(super) fn replace(&mut self, fields: NewTransaction) {
        self.title = fields.title;
        self.value = fields.value;
        self.kind = fields.kind;
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] tx={} title={:?} value={}",
            self.kind, self.id, self.title, self.value
        )
    }
}

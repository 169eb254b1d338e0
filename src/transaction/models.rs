//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::TransactionId};

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money that was earned, e.g. a salary payment.
    Income,
    /// Money that was spent, e.g. groceries.
    Expense,
}

impl TransactionKind {
    /// The text used to store and display the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    /// Parse a kind from its lowercase name, ignoring surrounding whitespace and case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(Error::InvalidKind(s.to_owned())),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        text.parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A short label grouping similar transactions, e.g. "food".
    pub category: String,
    /// When the transaction happened as ISO-8601 text.
    pub date: String,
    /// Free text describing the transaction.
    pub note: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(kind: TransactionKind, amount: f64, date: &str) -> TransactionBuilder {
        TransactionBuilder {
            kind,
            amount,
            category: DEFAULT_CATEGORY.to_owned(),
            date: date.to_owned(),
            note: None,
        }
    }
}

/// The category given to transactions created without one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// The field set used to create a transaction or to overwrite an existing one.
///
/// # Examples
///
/// ```ignore
/// use crate::transaction::{Transaction, TransactionKind};
///
/// let lunch = Transaction::build(TransactionKind::Expense, 12.5, "2024-01-02")
///     .category("food")
///     .note(Some("lunch"));
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,

    /// The monetary amount of the transaction.
    ///
    /// The sign is not checked. Expenses are recorded as positive amounts
    /// with the kind [TransactionKind::Expense].
    pub amount: f64,

    /// The category of the transaction, e.g. "food", "rent", "salary".
    ///
    /// Defaults to [DEFAULT_CATEGORY].
    pub category: String,

    /// When the transaction happened.
    ///
    /// Stored as given and sorted as text, so callers should supply
    /// ISO-8601 strings such as `2024-01-31` or `2024-01-31T08:15:00`.
    pub date: String,

    /// Optional free text about the transaction.
    pub note: Option<String>,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set the note for the transaction.
    pub fn note(mut self, note: Option<&str>) -> Self {
        self.note = note.map(ToOwned::to_owned);
        self
    }
}

//! Income and expense events recorded against the running total.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Direction of a transaction. The stored amount is always a magnitude; the
/// kind decides the sign applied to net worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn signed(self, amount: f64) -> f64 {
        match self {
            TransactionKind::Income => amount,
            TransactionKind::Expense => -amount,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction type `{}`", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Creation timestamp in milliseconds, bumped when needed to stay unique.
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub date: String,
}

impl Transaction {
    pub fn new(id: i64, kind: TransactionKind, amount: f64, date: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            amount,
            date: date.into(),
        }
    }

    /// Contribution of this transaction to net worth.
    pub fn signed_amount(&self) -> f64 {
        self.kind.signed(self.amount)
    }
}

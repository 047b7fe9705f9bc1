use serde::{Deserialize, Deserializer, Serialize};

use super::Transaction;

/// The single durable record: the running total plus the newest-first event log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub net_worth: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<Transaction>,
}

impl AppState {
    pub fn new(net_worth: f64, history: Vec<Transaction>) -> Self {
        Self { net_worth, history }
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty() && self.net_worth == 0.0
    }

    /// Most recently recorded transaction.
    pub fn latest(&self) -> Option<&Transaction> {
        self.history.first()
    }

    pub fn max_id(&self) -> Option<i64> {
        self.history.iter().map(|txn| txn.id).max()
    }

    /// Sum of signed amounts, oldest first, as net worth would have accumulated.
    pub fn signed_total(&self) -> f64 {
        self.history
            .iter()
            .rev()
            .map(Transaction::signed_amount)
            .sum()
    }
}

// Records written by the browser build stored `null` for cleared fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

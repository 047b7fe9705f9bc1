pub mod json_backend;
pub mod memory;

use std::{collections::HashSet, path::PathBuf, sync::Arc};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{core::errors::Result, domain::AppState};

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

/// Relative tolerance when comparing stored net worth with the history sum.
const DRIFT_TOLERANCE: f64 = 1e-6;

/// A single durable slot holding the serialized state record.
pub trait StateStore: Send + Sync {
    /// Returns the stored bytes, or `None` when nothing has been saved yet.
    /// Bytes are returned undecoded so that unreadable content still reaches
    /// [`StateStore::quarantine`].
    fn read_raw(&self) -> Result<Option<Vec<u8>>>;

    /// Replaces the stored record. Implementations must leave the previous
    /// record intact if the write fails part way.
    fn write_raw(&self, data: &str) -> Result<()>;

    /// Preserves a record that failed to decode before it gets overwritten.
    fn quarantine(&self, _raw: &[u8]) -> Result<Option<PathBuf>> {
        Ok(None)
    }

    /// Human-readable location, used in logs and the `config` command.
    fn describe(&self) -> String;
}

/// Shared handles let a caller keep inspecting a store after handing it to a tracker.
impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        (**self).read_raw()
    }

    fn write_raw(&self, data: &str) -> Result<()> {
        (**self).write_raw(data)
    }

    fn quarantine(&self, raw: &[u8]) -> Result<Option<PathBuf>> {
        (**self).quarantine(raw)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Why a stored record could not be turned into an [`AppState`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("stored record is empty")]
    Empty,
    #[error("stored record is malformed: {0}")]
    Malformed(String),
}

/// Decodes a stored record. Bytes that are not UTF-8 count as malformed.
pub fn decode_state(raw: impl AsRef<[u8]>) -> std::result::Result<AppState, DecodeError> {
    let raw = raw.as_ref();
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }
    serde_json::from_slice(raw).map_err(|err| DecodeError::Malformed(err.to_string()))
}

pub fn encode_state(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Where the state returned by [`PersistentStore::load_with_report`] came from.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadSource {
    Stored,
    Missing,
    Recovered(String),
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub state: AppState,
    pub source: LoadSource,
    pub warnings: Vec<String>,
    pub quarantined: Option<PathBuf>,
}

/// Fail-soft facade over a [`StateStore`]: loads degrade to the default state
/// and saves report failure through logs instead of errors.
pub struct PersistentStore {
    backend: Box<dyn StateStore>,
}

impl PersistentStore {
    pub fn new(backend: Box<dyn StateStore>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn StateStore {
        self.backend.as_ref()
    }

    pub fn load(&self) -> AppState {
        self.load_with_report().state
    }

    pub fn load_with_report(&self) -> LoadReport {
        let raw = match self.backend.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(location = %self.backend.describe(), "no saved state, starting fresh");
                return LoadReport {
                    state: AppState::default(),
                    source: LoadSource::Missing,
                    warnings: Vec::new(),
                    quarantined: None,
                };
            }
            Err(err) => {
                warn!(error = %err, "failed to read saved state, using defaults");
                return recovered(err.to_string(), None);
            }
        };

        match decode_state(&raw) {
            Ok(state) => {
                let warnings = state_warnings(&state);
                for warning in &warnings {
                    warn!(%warning, "saved state check");
                }
                info!(
                    transactions = state.history.len(),
                    net_worth = state.net_worth,
                    "loaded saved state"
                );
                LoadReport {
                    state,
                    source: LoadSource::Stored,
                    warnings,
                    quarantined: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to load data, using defaults");
                let quarantined = match self.backend.quarantine(&raw) {
                    Ok(path) => path,
                    Err(q_err) => {
                        warn!(error = %q_err, "could not quarantine unreadable state");
                        None
                    }
                };
                recovered(err.to_string(), quarantined)
            }
        }
    }

    /// Writes the full state. Returns whether the write succeeded.
    pub fn save(&self, state: &AppState) -> bool {
        let outcome = encode_state(state).and_then(|data| self.backend.write_raw(&data));
        match outcome {
            Ok(()) => {
                debug!(transactions = state.history.len(), "state saved");
                true
            }
            Err(err) => {
                error!(error = %err, location = %self.backend.describe(), "failed to save data");
                false
            }
        }
    }
}

fn recovered(reason: String, quarantined: Option<PathBuf>) -> LoadReport {
    LoadReport {
        state: AppState::default(),
        source: LoadSource::Recovered(reason),
        warnings: Vec::new(),
        quarantined,
    }
}

/// Detects inconsistencies in a state snapshot without modifying it.
pub fn state_warnings(state: &AppState) -> Vec<String> {
    let mut warnings = Vec::new();

    let total = state.signed_total();
    let scale = state.net_worth.abs().max(total.abs()).max(1.0);
    if (state.net_worth - total).abs() > DRIFT_TOLERANCE * scale {
        warnings.push(format!(
            "net worth {} differs from history total {}",
            state.net_worth, total
        ));
    }

    let mut seen = HashSet::new();
    for txn in &state.history {
        if !txn.amount.is_finite() || txn.amount <= 0.0 {
            warnings.push(format!(
                "transaction {} has non-positive amount {}",
                txn.id, txn.amount
            ));
        }
        if !seen.insert(txn.id) {
            warnings.push(format!("transaction id {} appears more than once", txn.id));
        }
    }

    if state
        .history
        .windows(2)
        .any(|pair| pair[0].id < pair[1].id)
    {
        warnings.push("history is not ordered newest first".to_string());
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Transaction, TransactionKind};

    fn txn(id: i64, kind: TransactionKind, amount: f64) -> Transaction {
        Transaction::new(id, kind, amount, "10/16/2026")
    }

    #[test]
    fn decode_distinguishes_empty_from_malformed() {
        assert_eq!(decode_state("  "), Err(DecodeError::Empty));
        assert!(matches!(
            decode_state("{not json"),
            Err(DecodeError::Malformed(_))
        ));
        assert!(matches!(
            decode_state(r#"{"netWorth": "lots"}"#),
            Err(DecodeError::Malformed(_))
        ));
        assert!(matches!(
            decode_state([b'{', 0xff, 0xfe, b'}']),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn consistent_state_has_no_warnings() {
        let state = AppState::new(
            700.0,
            vec![
                txn(2, TransactionKind::Expense, 300.0),
                txn(1, TransactionKind::Income, 1_000.0),
            ],
        );
        assert!(state_warnings(&state).is_empty());
    }

    #[test]
    fn warns_on_drift_duplicates_and_ordering() {
        let state = AppState::new(
            5.0,
            vec![
                txn(1, TransactionKind::Income, 1.0),
                txn(1, TransactionKind::Income, 0.0),
                txn(4, TransactionKind::Income, 2.0),
            ],
        );
        let warnings = state_warnings(&state);
        assert!(warnings.iter().any(|w| w.contains("differs from history")));
        assert!(warnings.iter().any(|w| w.contains("more than once")));
        assert!(warnings.iter().any(|w| w.contains("non-positive")));
        assert!(warnings.iter().any(|w| w.contains("newest first")));
    }

    #[test]
    fn load_recovers_from_malformed_record() {
        let store = PersistentStore::new(Box::new(MemoryStore::with_contents("{oops")));
        let report = store.load_with_report();
        assert_eq!(report.state, AppState::default());
        assert!(matches!(report.source, LoadSource::Recovered(_)));
    }

    #[test]
    fn failed_save_reports_false() {
        let backend = MemoryStore::new();
        backend.set_fail_writes(true);
        let store = PersistentStore::new(Box::new(backend));
        assert!(!store.save(&AppState::default()));
    }
}

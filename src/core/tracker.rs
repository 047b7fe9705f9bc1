use std::fmt::Write as _;

use tracing::{debug, info, warn};

use crate::{
    domain::{AppState, Milestone, Transaction, TransactionKind},
    storage::{LoadReport, PersistentStore, StateStore},
};

use super::{
    clock::Clock,
    errors::{Result, TrackerError},
    ids::IdGenerator,
    input::parse_amount,
    view_model::{apply_transaction, Dashboard},
};

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Result of recording one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    pub transaction: Transaction,
    pub net_worth: f64,
    /// Whether the new state reached durable storage.
    pub saved: bool,
}

/// Owns the in-memory state and is its only mutator.
///
/// Persistence is gated on `initialized`: nothing is written until the one
/// permitted load has completed, so startup can never overwrite saved data
/// with the empty default.
pub struct Tracker {
    state: AppState,
    store: PersistentStore,
    clock: Box<dyn Clock>,
    ids: IdGenerator,
    date_format: String,
    initialized: bool,
    load_report: Option<LoadReport>,
}

impl Tracker {
    pub fn new(store: Box<dyn StateStore>, clock: Box<dyn Clock>) -> Self {
        Self {
            state: AppState::default(),
            store: PersistentStore::new(store),
            clock,
            ids: IdGenerator::new(),
            date_format: FALLBACK_DATE_FORMAT.to_string(),
            initialized: false,
            load_report: None,
        }
    }

    /// Builds a tracker and performs its single load.
    pub fn open(store: Box<dyn StateStore>, clock: Box<dyn Clock>) -> Self {
        let mut tracker = Self::new(store, clock);
        // A fresh tracker has not loaded yet, so this cannot fail.
        let _ = tracker.load();
        tracker
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Loads persisted state. Allowed exactly once; never fails on bad data.
    pub fn load(&mut self) -> Result<&LoadReport> {
        if self.initialized {
            warn!("ignoring repeated load request");
            return Err(TrackerError::AlreadyLoaded);
        }
        let report = self.store.load_with_report();
        self.state = report.state.clone();
        self.ids = IdGenerator::seeded(self.state.max_id());
        self.initialized = true;
        info!(source = ?report.source, "tracker initialized");
        Ok(self.load_report.insert(report))
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn load_report(&self) -> Option<&LoadReport> {
        self.load_report.as_ref()
    }

    pub fn store(&self) -> &PersistentStore {
        &self.store
    }

    pub fn dashboard(&self, goal: f64, milestones: &[Milestone]) -> Dashboard {
        Dashboard::build(&self.state, goal, milestones)
    }

    /// Records a transaction with an already-numeric amount.
    pub fn add(&mut self, kind: TransactionKind, amount: f64) -> Result<ApplyOutcome> {
        if !self.initialized {
            return Err(TrackerError::NotLoaded);
        }
        let date = self.today_label();
        let mut ids = self.ids.clone();
        let id = ids.next(self.clock.as_ref());
        let next = apply_transaction(&self.state, kind, amount, id, date).map_err(|err| {
            warn!(error = %err, %kind, "transaction rejected");
            TrackerError::from(err)
        })?;

        self.ids = ids;
        self.state = next;
        let saved = self.persist();

        let transaction = self.state.history[0].clone();
        debug!(id = transaction.id, %kind, amount = transaction.amount, "transaction recorded");
        Ok(ApplyOutcome {
            transaction,
            net_worth: self.state.net_worth,
            saved,
        })
    }

    /// Records a transaction from free-text input, rejecting anything that is
    /// not a finite positive number without touching state.
    pub fn add_from_input(&mut self, kind: TransactionKind, raw: &str) -> Result<ApplyOutcome> {
        let amount = parse_amount(raw).map_err(|err| {
            warn!(error = %err, %kind, "amount input ignored");
            TrackerError::from(err)
        })?;
        self.add(kind, amount)
    }

    /// Writes the current state if the initial load has happened.
    pub fn save(&self) -> bool {
        self.persist()
    }

    fn persist(&self) -> bool {
        if !self.initialized {
            warn!("save skipped: state has not been loaded");
            return false;
        }
        self.store.save(&self.state)
    }

    fn today_label(&self) -> String {
        let today = self.clock.today();
        let mut label = String::new();
        if write!(label, "{}", today.format(&self.date_format)).is_err() {
            return today.format(FALLBACK_DATE_FORMAT).to_string();
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        core::FixedClock,
        domain::DEFAULT_MILESTONES,
        storage::{decode_state, encode_state, LoadSource, MemoryStore},
    };

    const NOW_MS: i64 = 1_760_600_000_000;

    fn tracker_with(store: Arc<MemoryStore>) -> Tracker {
        Tracker::new(Box::new(store), Box::new(FixedClock::from_millis(NOW_MS)))
            .with_date_format("%m/%d/%Y")
    }

    #[test]
    fn add_before_load_is_rejected_and_nothing_is_written() {
        let store = Arc::new(MemoryStore::new());
        let mut tracker = tracker_with(store.clone());

        let result = tracker.add(TransactionKind::Income, 10.0);
        assert!(matches!(result, Err(TrackerError::NotLoaded)));
        assert!(!tracker.save());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn load_happens_only_once() {
        let store = Arc::new(MemoryStore::new());
        let mut tracker = tracker_with(store);
        assert!(tracker.load().is_ok());
        assert!(matches!(tracker.load(), Err(TrackerError::AlreadyLoaded)));
    }

    #[test]
    fn first_income_saves_new_state() {
        let store = Arc::new(MemoryStore::new());
        let mut tracker = tracker_with(store.clone());
        tracker.load().expect("load");

        let outcome = tracker
            .add_from_input(TransactionKind::Income, "1000000")
            .expect("income");
        assert!(outcome.saved);
        assert_eq!(outcome.net_worth, 1_000_000.0);
        assert_eq!(outcome.transaction.id, NOW_MS);
        assert_eq!(outcome.transaction.date, "10/16/2025");

        let persisted = decode_state(&store.contents().expect("saved")).expect("decode");
        assert_eq!(&persisted, tracker.state());

        let dashboard = tracker.dashboard(1_000_000_000.0, &DEFAULT_MILESTONES);
        assert!(dashboard.milestones[0].reached);
    }

    #[test]
    fn invalid_input_leaves_state_and_storage_untouched() {
        let store = Arc::new(MemoryStore::new());
        let mut tracker = tracker_with(store.clone());
        tracker.load().expect("load");
        tracker
            .add(TransactionKind::Income, 50.0)
            .expect("seed income");
        let before = tracker.state().clone();
        let writes = store.write_count();

        for raw in ["", "abc", "-5", "0"] {
            assert!(matches!(
                tracker.add_from_input(TransactionKind::Expense, raw),
                Err(TrackerError::InvalidInput(_))
            ));
        }
        assert_eq!(tracker.state(), &before);
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn failed_save_keeps_in_memory_state() {
        let store = Arc::new(MemoryStore::new());
        let mut tracker = tracker_with(store.clone());
        tracker.load().expect("load");
        store.set_fail_writes(true);

        let outcome = tracker.add(TransactionKind::Income, 25.0).expect("income");
        assert!(!outcome.saved);
        assert_eq!(tracker.state().net_worth, 25.0);
        assert_eq!(tracker.state().history.len(), 1);
    }

    #[test]
    fn ids_continue_after_loaded_history() {
        let seeded = AppState::new(
            5.0,
            vec![Transaction::new(
                NOW_MS + 10,
                TransactionKind::Income,
                5.0,
                "10/16/2025",
            )],
        );
        let store = Arc::new(MemoryStore::with_contents(
            encode_state(&seeded).expect("encode"),
        ));
        let mut tracker = tracker_with(store);
        let report = tracker.load().expect("load");
        assert_eq!(report.source, LoadSource::Stored);

        let outcome = tracker.add(TransactionKind::Expense, 1.0).expect("expense");
        assert_eq!(outcome.transaction.id, NOW_MS + 11);
        assert_eq!(tracker.state().net_worth, 4.0);
    }

    #[test]
    fn corrupt_storage_loads_defaults() {
        let store = Arc::new(MemoryStore::with_contents("not json at all"));
        let tracker = Tracker::open(
            Box::new(store.clone()),
            Box::new(FixedClock::from_millis(NOW_MS)),
        );
        assert!(tracker.is_initialized());
        assert_eq!(tracker.state(), &AppState::default());
        assert_eq!(store.write_count(), 0);
    }
}

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

use crate::core::errors::{Result, TrackerError};

use super::StateStore;

/// In-process storage slot. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Vec<u8>>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(raw: impl Into<Vec<u8>>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
            ..Self::default()
        }
    }

    /// Makes every subsequent write fail, as a full or read-only disk would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl StateStore for MemoryStore {
    fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| TrackerError::Storage("memory slot poisoned".into()))?;
        Ok(slot.clone())
    }

    fn write_raw(&self, data: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TrackerError::Storage("storage unavailable".into()));
        }
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| TrackerError::Storage("memory slot poisoned".into()))?;
        *slot = Some(data.as_bytes().to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

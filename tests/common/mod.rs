#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use billion_tracker::{
    config::{ConfigManager, DEFAULT_STORAGE_KEY},
    core::{FixedClock, Tracker},
    storage::JsonFileStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// 2025-10-16T07:33:20Z
pub const NOW_MS: i64 = 1_760_600_000_000;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique data directory that outlives the calling test.
pub fn data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn file_store(base: &PathBuf) -> JsonFileStore {
    JsonFileStore::new(Some(base.clone()), DEFAULT_STORAGE_KEY).expect("create json store")
}

/// A loaded tracker over the JSON store in `base`, pinned to `NOW_MS`.
pub fn open_tracker(base: &PathBuf) -> Tracker {
    Tracker::open(
        Box::new(file_store(base)),
        Box::new(FixedClock::from_millis(NOW_MS)),
    )
    .with_date_format("%m/%d/%Y")
}

pub fn config_manager(base: &PathBuf) -> ConfigManager {
    ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir")
}

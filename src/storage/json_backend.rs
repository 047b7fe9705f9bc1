use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::Utc;
use tracing::{debug, info};

use crate::{
    core::errors::Result,
    utils::paths::{self, ensure_dir, write_atomic, write_synced},
};

use super::StateStore;

const QUARANTINE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Filesystem-backed JSON slot: one file per storage key under the data dir.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    key: String,
    path: PathBuf,
    quarantine_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: Option<PathBuf>, key: &str) -> Result<Self> {
        let root = paths::resolve_base(root);
        ensure_dir(&root)?;
        let key = canonical_key(key);
        let path = paths::state_file_in(&root, &key);
        let quarantine_dir = paths::quarantine_dir_in(&root);
        debug!(path = %path.display(), "json state store ready");
        Ok(Self {
            key,
            path,
            quarantine_dir,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn quarantine_dir(&self) -> &Path {
        &self.quarantine_dir
    }
}

impl StateStore for JsonFileStore {
    fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_raw(&self, data: &str) -> Result<()> {
        write_atomic(&self.path, data.as_bytes())?;
        Ok(())
    }

    fn quarantine(&self, raw: &[u8]) -> Result<Option<PathBuf>> {
        ensure_dir(&self.quarantine_dir)?;
        let stamp = Utc::now().format(QUARANTINE_TIMESTAMP_FORMAT);
        let target = self
            .quarantine_dir
            .join(format!("{}_{}.json", self.key, stamp));
        write_synced(&target, raw)?;
        info!(path = %target.display(), "unreadable state preserved");
        Ok(Some(target))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Restricts keys to a filesystem-safe slug.
fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "state".into()
    } else {
        sanitized
    }
}

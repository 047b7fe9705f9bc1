use dirs::home_dir;
use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

pub const HOME_ENV: &str = "BILLION_TRACKER_HOME";

const DEFAULT_DIR_NAME: &str = ".billion_tracker";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const QUARANTINE_DIR: &str = "quarantine";

/// Returns the application data directory, defaulting to `~/.billion_tracker`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Resolves an explicit base directory, falling back to [`app_data_dir`].
pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
    custom.unwrap_or_else(app_data_dir)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR).join(CONFIG_FILE)
}

pub fn quarantine_dir_in(base: &Path) -> PathBuf {
    base.join(QUARANTINE_DIR)
}

/// File backing the persisted state record for `key`.
pub fn state_file_in(base: &Path, key: &str) -> PathBuf {
    base.join(format!("{}.json", key))
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Sibling path used to stage writes before they are renamed over `path`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to `path` and flushes it to disk before returning.
pub fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

/// Replaces `path` by staging the bytes in [`tmp_path`] and renaming over it.
/// On failure the previous file is left untouched.
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let tmp = tmp_path(path);
    if let Err(err) = write_synced(&tmp, data) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    fs::rename(&tmp, path)
}

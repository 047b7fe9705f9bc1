//! User configuration: the goal, its milestones, the storage key, and display
//! preferences, persisted as JSON beside the state record.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::{
    core::errors::{Result, TrackerError},
    domain::{Milestone, DEFAULT_GOAL, DEFAULT_MILESTONES},
    utils::paths::{self, ensure_dir, write_atomic},
};

pub const DEFAULT_STORAGE_KEY: &str = "billion_tracker_v2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub goal: f64,
    /// Short label for the goal in headings, e.g. `$1B`.
    pub goal_label: String,
    pub milestones: Vec<Milestone>,
    pub storage_key: String,
    pub grouping_separator: char,
    /// `chrono` format string used for the date stamped on new transactions.
    pub date_format: String,
    pub history_limit: usize,
    pub ui_color_enabled: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            goal: DEFAULT_GOAL,
            goal_label: "$1B".into(),
            milestones: DEFAULT_MILESTONES.clone(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            grouping_separator: ',',
            date_format: "%m/%d/%Y".into(),
            history_limit: 10,
            ui_color_enabled: true,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.goal.is_finite() || self.goal <= 0.0 {
            return Err(TrackerError::Config(format!(
                "goal must be a positive number, got {}",
                self.goal
            )));
        }
        if let Some(bad) = self.milestones.iter().find(|m| !m.value.is_finite()) {
            return Err(TrackerError::Config(format!(
                "milestone `{}` has a non-finite value",
                bad.label
            )));
        }
        if self.storage_key.trim().is_empty() {
            return Err(TrackerError::Config("storage key must not be empty".into()));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(TrackerError::Config(format!(
                "invalid date format `{}`",
                self.date_format
            )));
        }
        if self.grouping_separator.is_ascii_digit() {
            return Err(TrackerError::Config(
                "grouping separator must not be a digit".into(),
            ));
        }
        Ok(())
    }
}

/// Handles persistence for [`TrackerConfig`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        let config_path = paths::config_file_in(&base);
        if let Some(parent) = config_path.parent() {
            ensure_dir(parent)?;
        }
        Ok(Self::new(config_path))
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<TrackerConfig> {
        if !self.config_path.exists() {
            return Ok(TrackerConfig::default());
        }
        let data = fs::read_to_string(&self.config_path)?;
        let config: TrackerConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`ConfigManager::load`], but an unreadable or invalid file yields
    /// the defaults.
    pub fn load_or_default(&self) -> TrackerConfig {
        self.load().unwrap_or_else(|err| {
            warn!(
                error = %err,
                path = %self.config_path.display(),
                "ignoring configuration file, using defaults"
            );
            TrackerConfig::default()
        })
    }

    pub fn save(&self, config: &TrackerConfig) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.config_path, json.as_bytes())?;
        Ok(())
    }
}

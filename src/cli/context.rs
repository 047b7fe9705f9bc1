use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tracing::debug;

use crate::{
    config::{ConfigManager, TrackerConfig},
    core::{SystemClock, Tracker},
    storage::JsonFileStore,
    utils::paths,
};

use super::commands;
use super::errors::{CliError, CommandError};
use super::io as cli_io;
use super::output;
use super::registry::CommandRegistry;

const PROMPT: &str = "billion> ";
const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Everything a command handler can reach: the tracker, configuration, and
/// the registry used for dispatch and help.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub tracker: Tracker,
    pub config: TrackerConfig,
    pub config_manager: ConfigManager,
    pub data_file: Option<PathBuf>,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    /// Builds the context from the data directory and performs the one state load.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = paths::app_data_dir();
        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load_or_default();
        let store = JsonFileStore::new(Some(base), &config.storage_key)?;
        let data_file = Some(store.path().to_path_buf());

        let mut tracker = Tracker::new(Box::new(store), Box::new(SystemClock))
            .with_date_format(config.date_format.clone());
        tracker.load()?;

        let mut context = Self::with_parts(mode, tracker, config, config_manager);
        context.data_file = data_file;
        Ok(context)
    }

    /// Assembles a context around an already-built tracker.
    pub fn with_parts(
        mode: CliMode,
        tracker: Tracker,
        config: TrackerConfig,
        config_manager: ConfigManager,
    ) -> Self {
        output::set_preferences(output::OutputPreferences {
            color_enabled: config.ui_color_enabled,
        });
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            tracker,
            config,
            config_manager,
            data_file: None,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub fn prompt(&self) -> String {
        PROMPT.to_string()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        debug!(command, ?args, "dispatching command");
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .into_iter()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        match cli_io::confirm_action(&self.theme, "Exit tracker?", true) {
            Ok(answer) => Ok(answer),
            Err(CommandError::Dialoguer(dialoguer::Error::IO(err))) => Err(err.into()),
            Err(_) => Ok(true),
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }
}

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::domain::TransactionKind;

use super::errors::CommandError;

/// Asks for the amount of a new transaction. Empty input is returned as-is so
/// the caller can treat it as "no change".
pub fn prompt_amount(theme: &ColorfulTheme, kind: TransactionKind) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(format!("Enter {} amount ($)", kind.label().to_lowercase()))
        .allow_empty(true)
        .interact_text()
        .map_err(CommandError::from)
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

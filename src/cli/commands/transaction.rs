use tracing::debug;

use crate::cli::context::{CliMode, ShellContext};
use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::formatting::format_currency;
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::TrackerError;
use crate::domain::TransactionKind;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "income",
            "Record money coming in",
            "income [amount]",
            cmd_income,
        ),
        CommandEntry::new(
            "expense",
            "Record money going out",
            "expense [amount]",
            cmd_expense,
        ),
    ]
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    record(context, TransactionKind::Income, args)
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    record(context, TransactionKind::Expense, args)
}

fn record(context: &mut ShellContext, kind: TransactionKind, args: &[&str]) -> CommandResult {
    let raw = match args {
        [] if context.mode == CliMode::Interactive => io::prompt_amount(&context.theme, kind)?,
        [] => {
            return Err(CommandError::InvalidArguments(format!(
                "usage: {} <amount>",
                kind.label().to_lowercase()
            )))
        }
        [amount] => (*amount).to_string(),
        _ => {
            return Err(CommandError::InvalidArguments(format!(
                "expected a single amount; usage: {} <amount>",
                kind.label().to_lowercase()
            )))
        }
    };

    match context.tracker.add_from_input(kind, &raw) {
        Ok(outcome) => {
            let sep = context.config.grouping_separator;
            output::success(format!(
                "{} of {} recorded. Net worth is now {}.",
                kind.label(),
                format_currency(outcome.transaction.amount, sep),
                format_currency(outcome.net_worth, sep)
            ));
            if !outcome.saved {
                output::warning("Changes could not be saved; they are kept for this session only.");
            }
            Ok(())
        }
        Err(TrackerError::InvalidInput(err)) => {
            debug!(input = %raw, "amount rejected");
            output::info(format!("No change: {}", err));
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

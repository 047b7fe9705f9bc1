use colored::Color;

use crate::cli::context::ShellContext;
use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::formatting::{self, format_currency};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::storage::{state_warnings, LoadSource};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "status",
            "Show net worth and progress toward the goal",
            "status",
            cmd_status,
        ),
        CommandEntry::new(
            "history",
            "List recent transactions, newest first",
            "history [limit]",
            cmd_history,
        ),
        CommandEntry::new(
            "milestones",
            "Show which milestones have been reached",
            "milestones",
            cmd_milestones,
        ),
        CommandEntry::new(
            "check",
            "Verify the saved state and report where it came from",
            "check",
            cmd_check,
        ),
    ]
}

pub(crate) fn print_status(context: &ShellContext) {
    let dashboard = context
        .tracker
        .dashboard(context.config.goal, &context.config.milestones);
    let width = formatting::bar_width();
    output::section("Net Worth");
    for line in formatting::render_dashboard(&dashboard, &context.config, width) {
        output::line(line);
    }
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_status(context);
    Ok(())
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("invalid limit `{}`", raw))
        })?,
        None => context.config.history_limit,
    };

    let history = &context.tracker.state().history;
    output::section("History");
    if history.is_empty() {
        output::info("No transactions recorded yet.");
        return Ok(());
    }

    let sep = context.config.grouping_separator;
    for txn in history.iter().take(limit) {
        output::line(formatting::render_transaction(txn, sep));
    }
    if history.len() > limit {
        output::info(format!(
            "Showing {} of {} transactions.",
            limit,
            history.len()
        ));
    }
    Ok(())
}

fn cmd_milestones(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let dashboard = context
        .tracker
        .dashboard(context.config.goal, &context.config.milestones);
    output::section("Milestones");
    if dashboard.milestones.is_empty() {
        output::info("No milestones configured.");
        return Ok(());
    }
    let rows = formatting::render_milestones(&dashboard);
    for (status, row) in dashboard.milestones.iter().zip(rows) {
        let color = if status.reached {
            Color::Green
        } else {
            Color::Yellow
        };
        output::colored_line(&row, color);
    }
    output::info(format!(
        "{} of {} reached.",
        dashboard.reached_count(),
        dashboard.milestones.len()
    ));
    Ok(())
}

fn cmd_check(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("State check");
    if let Some(path) = &context.data_file {
        output::info(format!("Data file: {}", path.display()));
    } else {
        output::info(format!(
            "Storage: {}",
            context.tracker.store().backend().describe()
        ));
    }

    if let Some(report) = context.tracker.load_report() {
        match &report.source {
            LoadSource::Stored => output::info("Loaded from saved data."),
            LoadSource::Missing => output::info("No saved data was found; started fresh."),
            LoadSource::Recovered(reason) => output::warning(format!(
                "Saved data was unreadable ({}); started fresh.",
                reason
            )),
        }
        if let Some(path) = &report.quarantined {
            output::warning(format!("Unreadable copy kept at {}", path.display()));
        }
    }

    let state = context.tracker.state();
    output::info(format!(
        "{} transactions, net worth {}",
        state.history.len(),
        format_currency(state.net_worth, context.config.grouping_separator)
    ));

    let warnings = state_warnings(state);
    if warnings.is_empty() {
        output::success("No problems found.");
    } else {
        for warning in warnings {
            output::warning(warning);
        }
    }
    Ok(())
}

use crate::cli::context::ShellContext;
use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::formatting::format_currency;
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "config",
            "Show the active configuration or write it to disk",
            "config [show|path|save]",
            cmd_config,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the tracker", "exit", cmd_exit),
    ]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        None | Some("show") => {
            show_config(context);
            Ok(())
        }
        Some("path") => {
            output::info(format!(
                "Config file: {}",
                context.config_manager.path().display()
            ));
            Ok(())
        }
        Some("save") => {
            context.config_manager.save(&context.config)?;
            output::success(format!(
                "Configuration written to {}",
                context.config_manager.path().display()
            ));
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{}`; usage: config [show|path|save]",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    let sep = config.grouping_separator;
    output::section("Configuration");
    output::info(format!(
        "  Goal          : {} ({})",
        format_currency(config.goal, sep),
        config.goal_label
    ));
    for milestone in &config.milestones {
        output::info(format!(
            "  Milestone     : {} at {}",
            milestone.label,
            format_currency(milestone.value, sep)
        ));
    }
    output::info(format!("  Storage key   : {}", config.storage_key));
    output::info(format!("  Separator     : '{}'", sep));
    output::info(format!("  Date format   : {}", config.date_format));
    output::info(format!("  History limit : {}", config.history_limit));
    output::info(format!(
        "  Colors        : {}",
        if config.ui_color_enabled { "on" } else { "off" }
    ));
    output::info(format!(
        "  Config file   : {}",
        context.config_manager.path().display()
    ));
    output::info(format!(
        "  Storage       : {}",
        context.tracker.store().backend().describe()
    ));
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Billion Tracker {}", meta.version));
    output::info(format!(
        "  Build hash : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::info(format!("  Built at   : {}", meta.timestamp));
    output::info(format!("  Target     : {}", meta.target));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        if let Some(entry) = context.registry.get(&name) {
            help::print_command(entry);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

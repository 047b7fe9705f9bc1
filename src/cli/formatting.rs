//! Text rendering for amounts, progress, and the dashboard. Everything here
//! returns plain strings; styling happens in [`super::output`].

use crate::{config::TrackerConfig, core::Dashboard, domain::Transaction};

const MAX_FRACTION_DIGITS: usize = 3;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 40;

/// Formats a number with digit grouping and at most three fraction digits,
/// dropping trailing zeros (`1234567.5` → `1,234,567.5`).
pub fn format_number(value: f64, separator: char) -> String {
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut body = group_digits(int_part, separator);
    if !frac.is_empty() {
        body.push('.');
        body.push_str(frac);
    }
    if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        body.insert(0, '-');
    }
    body
}

/// Dollar amount with the sign ahead of the symbol (`-$1,000`).
pub fn format_currency(value: f64, separator: char) -> String {
    let body = format_number(value, separator);
    match body.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", body),
    }
}

pub fn format_progress(progress: f64) -> String {
    format!("{:.4}%", progress)
}

/// Fixed-width bar; negative progress renders as empty.
pub fn progress_bar(progress: f64, width: usize) -> String {
    let width = width.max(1);
    let ratio = (progress / 100.0).clamp(0.0, 1.0);
    let mut filled = (ratio * width as f64).round() as usize;
    if filled == 0 && progress > 0.0 {
        filled = 1;
    }
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Picks a bar width that fits the current terminal.
pub fn bar_width() -> usize {
    let columns = crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(80);
    columns
        .saturating_sub(20)
        .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

pub fn render_dashboard(dashboard: &Dashboard, config: &TrackerConfig, width: usize) -> Vec<String> {
    let sep = config.grouping_separator;
    let mut lines = vec![
        format!(
            "Current Net Worth: {}",
            format_currency(dashboard.net_worth, sep)
        ),
        format!(
            "Progress to {}: {}",
            config.goal_label,
            format_progress(dashboard.progress)
        ),
        progress_bar(dashboard.progress, width),
    ];
    if let Some(next) = dashboard.next_milestone() {
        lines.push(format!(
            "Next milestone: {} ({} to go)",
            next.label,
            format_currency(next.value - dashboard.net_worth, sep)
        ));
    }
    lines
}

pub fn render_milestones(dashboard: &Dashboard) -> Vec<String> {
    let label_width = dashboard
        .milestones
        .iter()
        .map(|status| status.label.chars().count())
        .max()
        .unwrap_or(0);
    dashboard
        .milestones
        .iter()
        .map(|status| {
            format!(
                "{:<width$}  {}",
                status.label,
                status.status_label(),
                width = label_width
            )
        })
        .collect()
}

pub fn render_transaction(txn: &Transaction, separator: char) -> String {
    format!(
        "{:<12} {:<8} {:>18}",
        txn.date,
        txn.kind.label(),
        format_currency(txn.signed_amount(), separator)
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppState, TransactionKind, DEFAULT_GOAL, DEFAULT_MILESTONES};

    #[test]
    fn groups_thousands_and_trims_fraction() {
        assert_eq!(format_number(0.0, ','), "0");
        assert_eq!(format_number(999.0, ','), "999");
        assert_eq!(format_number(1_000.0, ','), "1,000");
        assert_eq!(format_number(1_234_567.5, ','), "1,234,567.5");
        assert_eq!(format_number(1_000_000_000.0, ','), "1,000,000,000");
        assert_eq!(format_number(12.3456, ','), "12.346");
        assert_eq!(format_number(-2_500.25, '.'), "-2.500.25");
    }

    #[test]
    fn tiny_negative_values_do_not_render_as_negative_zero() {
        assert_eq!(format_number(-0.0001, ','), "0");
    }

    #[test]
    fn currency_puts_sign_before_symbol() {
        assert_eq!(format_currency(1_000_000.0, ','), "$1,000,000");
        assert_eq!(format_currency(-450.0, ','), "-$450");
    }

    #[test]
    fn progress_uses_four_decimals() {
        assert_eq!(format_progress(0.1), "0.1000%");
        assert_eq!(format_progress(100.0), "100.0000%");
        assert_eq!(format_progress(-1.5), "-1.5000%");
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0, 10), "[----------]");
        assert_eq!(progress_bar(50.0, 10), "[#####-----]");
        assert_eq!(progress_bar(100.0, 10), "[##########]");
        assert_eq!(progress_bar(0.1, 10), "[#---------]");
        assert_eq!(progress_bar(-20.0, 10), "[----------]");
    }

    #[test]
    fn dashboard_lines_include_net_worth_and_progress() {
        let state = AppState::new(1_000_000.0, Vec::new());
        let dashboard = Dashboard::build(&state, DEFAULT_GOAL, &DEFAULT_MILESTONES);
        let lines = render_dashboard(&dashboard, &TrackerConfig::default(), 10);
        assert_eq!(lines[0], "Current Net Worth: $1,000,000");
        assert_eq!(lines[1], "Progress to $1B: 0.1000%");
        assert_eq!(lines[3], "Next milestone: $10 Million ($9,000,000 to go)");

        let rows = render_milestones(&dashboard);
        assert_eq!(rows[0], "$1 Million    Completed");
        assert_eq!(rows[3], "$1 Billion    Pending");
    }

    #[test]
    fn transaction_rows_show_signed_amounts() {
        let txn = Transaction::new(1, TransactionKind::Expense, 1_500.0, "10/16/2026");
        let row = render_transaction(&txn, ',');
        assert!(row.starts_with("10/16/2026   Expense"));
        assert!(row.ends_with("-$1,500"));
    }
}

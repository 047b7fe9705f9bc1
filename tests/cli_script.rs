mod common;

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use regex::Regex;

use common::data_dir;

fn script(home: &Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("billion_tracker_cli")
        .unwrap()
        .env("BILLION_TRACKER_CLI_SCRIPT", "1")
        .env("BILLION_TRACKER_HOME", home)
        .env("NO_COLOR", "1")
        .write_stdin(input)
        .assert()
}

#[test]
fn script_mode_records_income_and_reports_progress() {
    let home = data_dir();
    let assert = script(&home, "income 1000000\nstatus\nmilestones\nexit\n").success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("Net worth is now $1,000,000."));
    assert!(stdout.contains("Current Net Worth: $1,000,000"));
    let progress = Regex::new(r"Progress to \$1B: 0\.1000%").unwrap();
    assert!(progress.is_match(&stdout), "stdout was:\n{stdout}");
    let completed = Regex::new(r"\$1 Million\s+Completed").unwrap();
    assert!(completed.is_match(&stdout));
    let pending = Regex::new(r"\$10 Million\s+Pending").unwrap();
    assert!(pending.is_match(&stdout));

    let saved = std::fs::read_to_string(home.join("billion_tracker_v2.json")).unwrap();
    assert!(saved.contains("\"netWorth\": 1000000.0"));
}

#[test]
fn state_survives_between_runs() {
    let home = data_dir();
    script(&home, "income 2500\nexpense 500.25\n").success();

    script(&home, "status\nhistory\n")
        .success()
        .stdout(contains("Current Net Worth: $1,999.75"))
        .stdout(contains("-$500.25"))
        .stdout(contains("$2,500"));
}

#[test]
fn invalid_amount_is_ignored() {
    let home = data_dir();
    script(&home, "income abc\nexpense -5\nstatus\n")
        .success()
        .stdout(contains("No change: `abc` is not a number"))
        .stdout(contains("No change: amount must be greater than zero"))
        .stdout(contains("Current Net Worth: $0"));

    assert!(!home.join("billion_tracker_v2.json").exists());
}

#[test]
fn missing_amount_in_script_mode_reports_usage() {
    let home = data_dir();
    script(&home, "income\n")
        .success()
        .stderr(contains("usage: income <amount>"));
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let home = data_dir();
    script(&home, "statsu\n")
        .success()
        .stdout(contains("Unknown command `statsu`"))
        .stdout(contains("Suggestion: `status`?"));
}

#[test]
fn corrupt_state_is_quarantined_and_reported() {
    let home = data_dir();
    std::fs::write(home.join("billion_tracker_v2.json"), "not json at all").unwrap();

    script(&home, "check\n")
        .success()
        .stdout(contains("Saved data was unreadable"))
        .stdout(contains("Unreadable copy kept at"));

    let quarantined = std::fs::read_dir(home.join("quarantine"))
        .unwrap()
        .filter_map(Result::ok)
        .count();
    assert_eq!(quarantined, 1);
}

#[test]
fn quit_alias_stops_the_script() {
    let home = data_dir();
    script(&home, "# comment lines are skipped\nquit\nincome 10\n")
        .success()
        .stdout(contains("recorded").not());
}

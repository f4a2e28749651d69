use assert_cmd::Command;
use chrono::{Datelike, Duration, Local};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn ledger(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ledger").unwrap();
    cmd.env("LEDGER_DATA_DIR", data_dir.path())
        .env_remove("LEDGER_USER")
        .env("RUST_LOG", "off");
    cmd
}

fn add(data_dir: &TempDir, user: &str, args: &[&str]) {
    ledger(data_dir)
        .args(["--user", user, "add"])
        .args(args)
        .assert()
        .success();
}

#[test]
fn test_add_then_list() {
    let dir = TempDir::new().unwrap();
    add(&dir, "alice", &["SALARY", "1000", "--member", "John Doe", "--date", "2023-04-15"]);
    add(&dir, "alice", &["grocery", "200", "--member", "Jane Doe", "--date", "2023-04-20"]);

    ledger(&dir)
        .args(["--user", "alice", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SALARY"))
        .stdout(predicate::str::contains("GROCERY"))
        .stdout(predicate::str::contains("2 transaction(s), net $800.00"));

    ledger(&dir)
        .args(["--user", "alice", "list", "--member", "jane doe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GROCERY"))
        .stdout(predicate::str::contains("SALARY").not());
}

#[test]
fn test_records_written_in_line_format() {
    let dir = TempDir::new().unwrap();
    add(&dir, "bob", &["SALARY", "1000", "--member", "John", "--date", "2023-04-15"]);
    add(&dir, "bob", &["HOUSING", "750.5", "--member", "John", "--no-date"]);

    let contents = fs::read_to_string(dir.path().join("userdata").join("bob.csv")).unwrap();
    assert_eq!(
        contents,
        "1,Income:SALARY,1000.0,2023-04-15,John\n2,Expense::HOUSING,750.5,,John\n"
    );
}

#[test]
fn test_users_are_isolated() {
    let dir = TempDir::new().unwrap();
    add(&dir, "alice", &["SALARY", "10", "--member", "A", "--date", "2023-01-01"]);

    ledger(&dir)
        .args(["--user", "carol", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found"));
}

#[test]
fn test_invalid_range_rejected() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .args(["--user", "alice", "range", "--from", "2024-05-01", "--to", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be before or equal to"));
}

#[test]
fn test_date_filter_with_date_sort_rejected() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .args(["--user", "alice", "list", "--date", "2024-01-01", "--sort", "date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot filter and sort by date"));
}

#[test]
fn test_update_and_remove() {
    let dir = TempDir::new().unwrap();
    add(&dir, "dan", &["GROCERY", "50", "--member", "Dan", "--date", "2024-02-02"]);

    ledger(&dir)
        .args(["--user", "dan", "update", "1", "--amount", "75"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$75.00"));

    ledger(&dir)
        .args(["--user", "dan", "remove", "1"])
        .assert()
        .success();

    ledger(&dir)
        .args(["--user", "dan", "remove", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_rename_member() {
    let dir = TempDir::new().unwrap();
    add(&dir, "erin", &["SALARY", "10", "--member", "Jon", "--date", "2024-01-01"]);

    ledger(&dir)
        .args(["--user", "erin", "rename-member", "jon", "John"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 transaction(s) updated"));

    ledger(&dir)
        .args(["--user", "erin", "members"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John"));
}

#[test]
fn test_rename_member_onto_existing_name_rejected() {
    let dir = TempDir::new().unwrap();
    add(&dir, "ivy", &["SALARY", "10", "--member", "Jon", "--date", "2024-01-01"]);
    add(&dir, "ivy", &["SALARY", "20", "--member", "Ann", "--date", "2024-01-02"]);

    ledger(&dir)
        .args(["--user", "ivy", "rename-member", "Jon", "Ann"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Member already exists: Ann"));

    let contents = fs::read_to_string(dir.path().join("userdata").join("ivy.csv")).unwrap();
    assert_eq!(
        contents,
        "1,Income:SALARY,10.0,2024-01-01,Jon\n2,Income:SALARY,20.0,2024-01-02,Ann\n"
    );
}

#[test]
fn test_rename_member_exact_case_variant() {
    let dir = TempDir::new().unwrap();
    let userdata = dir.path().join("userdata");
    fs::create_dir_all(&userdata).unwrap();
    fs::write(
        userdata.join("jay.csv"),
        "1,Income:SALARY,10.0,2024-01-01,Jon\n2,Income:SALARY,20.0,2024-01-02,JON\n",
    )
    .unwrap();

    ledger(&dir)
        .args(["--user", "jay", "rename-member", "JON", "Jonathan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 transaction(s) updated"));

    let contents = fs::read_to_string(dir.path().join("userdata").join("jay.csv")).unwrap();
    assert_eq!(
        contents,
        "1,Income:SALARY,10.0,2024-01-01,Jon\n2,Income:SALARY,20.0,2024-01-02,Jonathan\n"
    );
}

#[test]
fn test_date_format_setting_applies_to_listings() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .args(["config", "--date-format", "%d/%m/%Y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Date format:    %d/%m/%Y"));

    ledger(&dir)
        .args(["--user", "kim", "add", "SALARY", "10", "--member", "Kim", "--date", "2024-03-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Date:        07/03/2024"));

    ledger(&dir)
        .args(["--user", "kim", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("07/03/2024"))
        .stdout(predicate::str::contains("2024-03-07").not());

    // The record file keeps ISO dates
    let contents = fs::read_to_string(dir.path().join("userdata").join("kim.csv")).unwrap();
    assert_eq!(contents, "1,Income:SALARY,10.0,2024-03-07,Kim\n");

    ledger(&dir)
        .args(["config", "--date-format", "%Q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_categories_report_top() {
    let dir = TempDir::new().unwrap();
    let today = Local::now().date_naive();
    let last_month = (today - Duration::days(i64::from(today.day()) + 5)).to_string();

    add(&dir, "lee", &["HOUSING", "50", "--member", "Lee", "--date", &last_month]);
    add(&dir, "lee", &["GROCERY", "300", "--member", "Lee", "--date", &last_month]);
    add(&dir, "lee", &["HEALTHCARE", "150", "--member", "Lee", "--date", &last_month]);

    ledger(&dir)
        .args(["--user", "lee", "report", "categories", "--top", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 2 Expense:"))
        .stdout(predicate::str::contains("  1. GROCERY"))
        .stdout(predicate::str::contains("  2. HEALTHCARE"));
}

#[test]
fn test_missing_user_fails() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user given"));
}

#[test]
fn test_default_user_from_config() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .args(["config", "--default-user", "frank"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default user:   frank"));

    ledger(&dir).arg("list").assert().success();
    assert!(dir.path().join("userdata").join("frank.csv").exists());
}

#[test]
fn test_categories_listing() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .args(["--user", "alice", "categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TELECOMMUNICATION"))
        .stdout(predicate::str::contains("SIDEHUSTLE"));
}

#[test]
fn test_corrupt_file_reports_error() {
    let dir = TempDir::new().unwrap();
    let userdata = dir.path().join("userdata");
    fs::create_dir_all(&userdata).unwrap();
    fs::write(userdata.join("gina.csv"), "1,Income:PIZZA,10.0,2024-01-01,G\n").unwrap();

    ledger(&dir)
        .args(["--user", "gina", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category: PIZZA"));
}

#[test]
fn test_report_commands_run() {
    let dir = TempDir::new().unwrap();
    add(&dir, "hal", &["SALARY", "3000", "--member", "Hal", "--date", "2020-01-15"]);

    for report in ["trend", "categories", "members", "forecast"] {
        ledger(&dir)
            .args(["--user", "hal", "report", report, "--period", "annual"])
            .assert()
            .success();
    }

    ledger(&dir)
        .args(["--user", "hal", "report", "trend", "--period", "weekly"])
        .assert()
        .failure();
}

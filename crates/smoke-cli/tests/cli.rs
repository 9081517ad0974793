//! Binary-level tests for the smoke CLI.
//!
//! Everything here runs without Chrome except the tests marked #[ignore],
//! which exercise the real launch-navigate-report path.

use assert_cmd::Command;
use predicates::prelude::*;

fn smoke() -> Command {
    Command::cargo_bin("smoke").expect("binary built")
}

#[test]
fn help_describes_the_check() {
    smoke()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Headless page smoke-checker"));
}

#[test]
fn rejects_non_http_target() {
    smoke()
        .arg("ftp://example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("http(s)"));
}

#[test]
fn rejects_conflicting_verbosity_flags() {
    smoke()
        .args(["--verbose", "--quiet"])
        .assert()
        .failure();
}

#[test]
#[ignore] // Requires Chrome to be installed
fn unreachable_target_prints_one_diagnostic_and_no_report() {
    // Port 1 is essentially never listening.
    smoke()
        .arg("http://127.0.0.1:1/")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("--- CONSOLE MESSAGES ---").not())
        .stderr(predicate::str::contains("headless check failed:"));
}

#[test]
#[ignore] // Requires Chrome and a dev server on localhost:8000
fn reachable_target_prints_all_three_sections() {
    smoke()
        .assert()
        .stdout(predicate::str::contains("--- CONSOLE MESSAGES ---"))
        .stdout(predicate::str::contains("--- PAGE ERRORS ---"))
        .stdout(predicate::str::contains("--- FAILED REQUESTS ---"));
}

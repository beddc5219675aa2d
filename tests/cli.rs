#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn cli(roster: &Path) -> Command {
    let mut cmd = Command::cargo_bin("roulement-cli").unwrap();
    cmd.arg("--roster").arg(roster);
    cmd
}

#[test]
fn generate_edit_check_export() {
    let dir = tempdir().unwrap();
    let roster = dir.path().join("roster.json");

    for args in [
        vec!["staff-add", "--name", "Alice"],
        vec!["staff-add", "--name", "Bruno"],
        vec!["staff-add", "--name", "Chloé", "--part-time"],
    ] {
        cli(&roster).args(args).assert().success();
    }

    cli(&roster)
        .args(["generate", "--year", "2025", "--month", "10"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2025-10"))
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("2*"));

    cli(&roster)
        .args(["show", "--year", "2025", "--month", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chloé"));

    cli(&roster)
        .args(["toggle-on-call", "--name", "Chloé", "--year", "2025", "--month", "10", "--day", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("on-call invalid"));

    cli(&roster)
        .args(["cycle", "--name", "Alice", "--year", "2025", "--month", "10", "--day", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice day 1: OFF"));

    cli(&roster)
        .args(["check", "--year", "2025", "--month", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no violations"));

    let out = dir.path().join("grid.csv");
    cli(&roster)
        .args(["export", "--year", "2025", "--month", "10", "--out-csv"])
        .arg(&out)
        .assert()
        .success();
    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.contains("Alice,OFF,,2,,2,X"));
}

#[test]
fn bad_inputs_fail_cleanly() {
    let dir = tempdir().unwrap();
    let roster = dir.path().join("roster.json");

    cli(&roster)
        .args(["generate", "--year", "2025", "--month", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("aucun membre"));

    cli(&roster).args(["staff-add", "--name", "Alice"]).assert().success();

    cli(&roster)
        .args(["generate", "--year", "2025", "--month", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid month"));

    cli(&roster)
        .args(["show", "--year", "2025", "--month", "11"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("run `generate` first"));

    cli(&roster)
        .args(["absence-add", "--name", "Nobody", "--date", "2025-10-03", "--kind", "sick"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown staff member"));
}

use assert_cmd::Command;
use predicates::prelude::*;

fn summary_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gh-daily-summary").expect("Binary exists");
    // The test environment may carry real credentials; strip them so the
    // configuration paths under test are deterministic.
    cmd.env_remove("GH_USERNAME")
        .env_remove("GH_TOKEN")
        .env_remove("GITHUB_TOKEN")
        .env_remove("SUMMARY_REPO")
        .env_remove("TZ_NAME");
    cmd
}

#[test]
fn help_describes_the_run_subcommand() {
    summary_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"));
}

#[test]
fn run_fails_without_an_account_login() {
    summary_cmd()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GH_USERNAME"));
}

#[test]
fn run_fails_without_a_token() {
    summary_cmd()
        .arg("run")
        .env("GH_USERNAME", "octocat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GH_TOKEN"));
}

//! End-to-end tests for the transx binary
//!
//! These drive the compiled CLI with `assert_cmd`. The probe binary is
//! pointed at `true` so the runs stay independent of an installed ffprobe;
//! with nonexistent input paths the pre-flight probe reports an absent file
//! and the raw command override supplies the actual child process.

use assert_cmd::Command;
use predicates::prelude::*;

fn transx() -> Command {
    let mut cmd = Command::cargo_bin("transx").unwrap();
    cmd.env("TRANSX_FFPROBE", "true");
    cmd.env_remove("TRANSX_TIMEOUT_SECS");
    cmd
}

#[test]
fn help_lists_subcommands() {
    transx()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("transcode"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn transcode_help_shows_supervision_flags() {
    transx()
        .args(["transcode", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("--no-validate"))
        .stdout(predicate::str::contains("--raw"));
}

#[test]
fn raw_command_clean_exit_succeeds_without_validation() {
    transx()
        .args([
            "transcode",
            "--input",
            "/nonexistent/input.mov",
            "--raw",
            "true",
            "--no-validate",
            "--quiet",
        ])
        .assert()
        .success();
}

#[test]
fn raw_command_nonzero_exit_reports_crash() {
    transx()
        .args([
            "transcode",
            "--input",
            "/nonexistent/input.mov",
            "--raw",
            "exit 3",
            "--no-validate",
            "--quiet",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("crashed"));
}

#[test]
fn error_marker_in_output_reports_crash() {
    transx()
        .args([
            "transcode",
            "--input",
            "/nonexistent/input.mov",
            "--raw",
            "printf 'Error while decoding stream\\n' >&2; sleep 10",
            "--no-validate",
            "--quiet",
        ])
        .timeout(std::time::Duration::from_secs(8))
        .assert()
        .failure()
        .stderr(predicate::str::contains("crashed"));
}

#[test]
fn silent_process_reports_hang() {
    transx()
        .args([
            "transcode",
            "--input",
            "/nonexistent/input.mov",
            "--raw",
            "sleep 10",
            "--timeout",
            "1",
            "--no-validate",
            "--quiet",
        ])
        .timeout(std::time::Duration::from_secs(8))
        .assert()
        .failure()
        .stderr(predicate::str::contains("hung"));
}

#[test]
fn validation_against_missing_artifact_reports_no_output() {
    transx()
        .args([
            "transcode",
            "--input",
            "/nonexistent/input.mov",
            "--output",
            "/nonexistent/output.mp4",
            "--raw",
            "true",
            "--quiet",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no_output"));
}

#[test]
fn invalid_aspect_mode_is_rejected() {
    transx()
        .args([
            "transcode",
            "--input",
            "/nonexistent/input.mov",
            "--raw",
            "true",
            "--no-validate",
            "--quiet",
            "--aspect",
            "sideways",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("aspect"));
}

#[test]
fn inspect_missing_file_fails() {
    transx()
        .args(["inspect", "--input", "/nonexistent/input.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn env_timeout_applies_to_transcode() {
    let mut cmd = transx();
    cmd.env("TRANSX_TIMEOUT_SECS", "1");
    cmd.args([
        "transcode",
        "--input",
        "/nonexistent/input.mov",
        "--raw",
        "sleep 10",
        "--no-validate",
        "--quiet",
    ])
    .timeout(std::time::Duration::from_secs(8))
    .assert()
    .failure()
    .stderr(predicate::str::contains("hung"));
}

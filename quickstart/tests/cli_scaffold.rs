//! CLI tests for `quickstart init` and `quickstart verify`.
//!
//! Spawns the quickstart binary and verifies exit codes match expected
//! values for clean, drifted, and freshly scaffolded project states.

use std::fs;
use std::process::Command;

use quickstart::exit_codes;

fn quickstart(dir: &std::path::Path, args: &[&str]) -> std::process::ExitStatus {
    Command::new(env!("CARGO_BIN_EXE_quickstart"))
        .current_dir(dir)
        .args(args)
        .status()
        .expect("run quickstart")
}

#[test]
fn init_then_verify_is_clean() {
    let temp = tempfile::tempdir().expect("tempdir");

    let status = quickstart(temp.path(), &["init"]);
    assert_eq!(status.code(), Some(exit_codes::OK));
    assert!(temp.path().join("api/launch.py").is_file());
    assert!(temp.path().join("frontend/index.html").is_file());
    assert!(temp.path().join(".github/workflows/deploy.yml").is_file());

    let status = quickstart(temp.path(), &["verify"]);
    assert_eq!(status.code(), Some(exit_codes::OK));
}

#[test]
fn verify_exits_with_drift_code_after_tampering() {
    let temp = tempfile::tempdir().expect("tempdir");
    assert_eq!(
        quickstart(temp.path(), &["init"]).code(),
        Some(exit_codes::OK)
    );

    fs::write(temp.path().join("vercel.json"), "{}").expect("tamper");
    fs::remove_file(temp.path().join("deploy.py")).expect("remove");

    let status = quickstart(temp.path(), &["verify"]);
    assert_eq!(status.code(), Some(exit_codes::DRIFT));
}

#[test]
fn verify_treats_binary_garbage_as_drift() {
    let temp = tempfile::tempdir().expect("tempdir");
    assert_eq!(
        quickstart(temp.path(), &["init"]).code(),
        Some(exit_codes::OK)
    );

    fs::write(temp.path().join("vercel.json"), [0xff, 0xfe, 0x00]).expect("tamper");

    let status = quickstart(temp.path(), &["verify"]);
    assert_eq!(status.code(), Some(exit_codes::DRIFT));
}

#[test]
fn verify_reports_drift_on_empty_directory() {
    let temp = tempfile::tempdir().expect("tempdir");
    let status = quickstart(temp.path(), &["verify"]);
    assert_eq!(status.code(), Some(exit_codes::DRIFT));
}

#[test]
fn init_respects_config_project_name() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(
        temp.path().join("quickstart.toml"),
        "project_name = \"demo-app\"\n",
    )
    .expect("write config");

    assert_eq!(
        quickstart(temp.path(), &["init"]).code(),
        Some(exit_codes::OK)
    );
    let vercel = fs::read_to_string(temp.path().join("vercel.json")).expect("read");
    assert!(vercel.contains("\"name\": \"demo-app\""));
}

#[test]
fn invalid_config_exits_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(
        temp.path().join("quickstart.toml"),
        "project_name = \"Bad Name\"\n",
    )
    .expect("write config");

    let status = quickstart(temp.path(), &["init"]);
    assert_eq!(status.code(), Some(exit_codes::INVALID));
}

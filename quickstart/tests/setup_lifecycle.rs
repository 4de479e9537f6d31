//! Lifecycle tests for the full setup flow.
//!
//! These drive `run_setup` with scripted host/deployer adapters and a real
//! git repository to verify end-to-end behavior: file generation, commit
//! bootstrap, per-step degradation, and outcome reporting.

use std::path::Path;
use std::process::Command;

use quickstart::core::templates::build_manifest;
use quickstart::io::config::{DeployConfig, GithubConfig, SetupConfig};
use quickstart::io::git::Git;
use quickstart::io::github::PublishOutcome;
use quickstart::io::vercel::DeployOutcome;
use quickstart::setup::{SetupOptions, StepStatus, run_setup};
use quickstart::test_support::{ScriptedDeployer, ScriptedHost, TestRepo};
use quickstart::verify::verify_project;

fn capture(root: &Path, args: &[&str]) -> String {
    let out = Command::new(args[0])
        .args(&args[1..])
        .current_dir(root)
        .output()
        .expect("run command");
    assert!(out.status.success(), "command failed: {args:?}");
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

/// Full flow: scaffold → commit → publish → deploy, everything succeeding.
#[test]
fn full_run_scaffolds_commits_and_deploys() {
    let repo = TestRepo::new().expect("repo");
    let root = repo.root();
    let config = SetupConfig::default();

    let host = ScriptedHost::new(vec![PublishOutcome::Created {
        url: Some("https://github.com/someone/autonomous-revenue-system".to_string()),
    }]);
    let deployer = ScriptedDeployer::new(vec![DeployOutcome::Deployed {
        url: Some("https://autonomous-revenue-system.vercel.app".to_string()),
    }]);

    let outcome = run_setup(root, &config, &host, &deployer, &SetupOptions::default())
        .expect("run_setup");

    // Every manifest file landed on disk and matches.
    let manifest = build_manifest(&config.project_settings()).expect("manifest");
    assert_eq!(outcome.report.written.len(), manifest.len());
    let verified = verify_project(root, &manifest).expect("verify");
    assert!(verified.is_clean());

    // Git bootstrap committed the generated files.
    assert_eq!(outcome.git, StepStatus::Completed);
    let last_msg = capture(root, &["git", "log", "-1", "--pretty=%B"]);
    assert!(last_msg.contains("Initial commit: autonomous-revenue-system v2.0.0"));
    let git = Git::new(root);
    assert!(!git.has_staged_changes().expect("staged"));

    // Host was asked to create the configured repo; URLs surfaced.
    assert_eq!(
        host.requested_repos(),
        vec!["autonomous-revenue-system".to_string()]
    );
    assert_eq!(outcome.github, StepStatus::Completed);
    assert_eq!(
        outcome.github_url.as_deref(),
        Some("https://github.com/someone/autonomous-revenue-system")
    );
    assert_eq!(outcome.deploy, StepStatus::Completed);
    assert_eq!(
        outcome.deploy_url.as_deref(),
        Some("https://autonomous-revenue-system.vercel.app")
    );
    assert!(outcome.fully_succeeded());
}

/// A failing deployment is recorded but does not abort the run.
#[test]
fn deploy_failure_degrades_to_partial_outcome() {
    let repo = TestRepo::new().expect("repo");
    let config = SetupConfig::default();

    let host = ScriptedHost::new(vec![PublishOutcome::Created { url: None }]);
    let deployer = ScriptedDeployer::new(vec![DeployOutcome::Failed {
        message: "not logged in".to_string(),
    }]);

    let outcome = run_setup(
        repo.root(),
        &config,
        &host,
        &deployer,
        &SetupOptions::default(),
    )
    .expect("run_setup");

    assert_eq!(outcome.git, StepStatus::Completed);
    assert_eq!(outcome.github, StepStatus::Completed);
    assert_eq!(
        outcome.deploy,
        StepStatus::Failed {
            message: "not logged in".to_string()
        }
    );
    assert!(!outcome.fully_succeeded());

    // The project files are still fully written.
    assert!(repo.root().join("api/status.py").is_file());
    assert!(repo.root().join("README.md").is_file());
}

/// Re-running setup is idempotent for files and produces no second commit.
#[test]
fn rerun_skips_existing_files_and_commits_nothing() {
    let repo = TestRepo::new().expect("repo");
    let config = SetupConfig::default();

    let host = ScriptedHost::new(vec![
        PublishOutcome::Created { url: None },
        PublishOutcome::Created { url: None },
    ]);
    let deployer = ScriptedDeployer::new(vec![
        DeployOutcome::Deployed { url: None },
        DeployOutcome::Deployed { url: None },
    ]);

    let first = run_setup(
        repo.root(),
        &config,
        &host,
        &deployer,
        &SetupOptions::default(),
    )
    .expect("first run");
    assert!(!first.report.written.is_empty());

    let second = run_setup(
        repo.root(),
        &config,
        &host,
        &deployer,
        &SetupOptions::default(),
    )
    .expect("second run");
    assert!(second.report.written.is_empty());
    assert_eq!(second.report.skipped.len(), first.report.written.len());
    assert_eq!(second.git, StepStatus::Completed);

    let count = capture(repo.root(), &["git", "rev-list", "--count", "HEAD"]);
    assert_eq!(count, "1", "no empty second commit");
}

/// A plain directory (no repo yet) gets `git init` as part of the flow.
#[test]
fn setup_initializes_repository_in_plain_directory() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = SetupConfig {
        github: GithubConfig {
            enabled: false,
            ..GithubConfig::default()
        },
        deploy: DeployConfig { enabled: false },
        ..SetupConfig::default()
    };

    let host = ScriptedHost::new(vec![]);
    let deployer = ScriptedDeployer::new(vec![]);

    let outcome = run_setup(
        temp.path(),
        &config,
        &host,
        &deployer,
        &SetupOptions::default(),
    )
    .expect("run_setup");

    let git = Git::new(temp.path());
    assert!(git.is_repo().expect("is_repo"));
    // Commit success depends on machine-level git identity; the repository
    // itself must exist either way.
    assert!(matches!(
        outcome.git,
        StepStatus::Completed | StepStatus::Failed { .. }
    ));
}

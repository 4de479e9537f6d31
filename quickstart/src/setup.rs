//! Orchestration for the one-click setup flow.
//!
//! `run_setup` drives: write the project files, bootstrap git, create the
//! GitHub repository, deploy to Vercel. Scaffolding failures abort the run;
//! the external tool steps degrade to a recorded status plus a warning so a
//! missing CLI never blocks the rest of the flow.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::core::templates::build_manifest;
use crate::io::config::SetupConfig;
use crate::io::git::Git;
use crate::io::github::{PublishOutcome, PublishRequest, RepoHost};
use crate::io::scaffold::{ScaffoldOptions, ScaffoldReport, scaffold_project};
use crate::io::vercel::{DeployOutcome, DeployRequest, Deployer};

/// Options for `run_setup`.
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// Overwrite existing generated files.
    pub force: bool,
    /// Skip the GitHub step even when enabled in config.
    pub skip_github: bool,
    /// Skip the Vercel step even when enabled in config.
    pub skip_deploy: bool,
}

/// Result of a single optional step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Skipped,
    CliMissing,
    Failed { message: String },
}

impl StepStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::CliMissing | Self::Failed { .. })
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Skipped => write!(f, "skipped"),
            Self::CliMissing => write!(f, "tool not installed"),
            Self::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}

/// Outcome of `quickstart run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutcome {
    pub report: ScaffoldReport,
    pub git: StepStatus,
    pub github: StepStatus,
    pub github_url: Option<String>,
    pub deploy: StepStatus,
    pub deploy_url: Option<String>,
}

impl SetupOutcome {
    /// True when every enabled step finished without a failure.
    pub fn fully_succeeded(&self) -> bool {
        !(self.git.is_failure() || self.github.is_failure() || self.deploy.is_failure())
    }
}

/// Run the complete setup flow in `root`.
pub fn run_setup<H: RepoHost, D: Deployer>(
    root: &Path,
    config: &SetupConfig,
    host: &H,
    deployer: &D,
    options: &SetupOptions,
) -> Result<SetupOutcome> {
    config.validate()?;
    debug!(root = %root.display(), project = %config.project_name, "starting setup");

    let manifest = build_manifest(&config.project_settings())?;
    let report = scaffold_project(
        root,
        &manifest,
        &ScaffoldOptions {
            force: options.force,
        },
    )
    .context("write project files")?;

    let git = Git::new(root);
    let git_status = bootstrap_git(&git, config);

    let (github, github_url) = if options.skip_github || !config.github.enabled {
        (StepStatus::Skipped, None)
    } else {
        publish_github(&git, host, config)
    };

    let (deploy, deploy_url) = if options.skip_deploy || !config.deploy.enabled {
        (StepStatus::Skipped, None)
    } else {
        deploy_project(deployer, root, config)
    };

    info!(
        files_written = report.written.len(),
        git = %git_status,
        github = %github,
        deploy = %deploy,
        "setup finished"
    );
    Ok(SetupOutcome {
        report,
        git: git_status,
        github,
        github_url,
        deploy,
        deploy_url,
    })
}

/// Initialize a repository (if needed) and commit the generated files.
///
/// Failures degrade to `StepStatus::Failed` so the rest of the flow runs.
pub fn bootstrap_git(git: &Git, config: &SetupConfig) -> StepStatus {
    match try_bootstrap_git(git, config) {
        Ok(()) => StepStatus::Completed,
        Err(err) => {
            warn!(err = format!("{err:#}"), "git setup failed");
            StepStatus::Failed {
                message: format!("{err:#}"),
            }
        }
    }
}

fn try_bootstrap_git(git: &Git, config: &SetupConfig) -> Result<()> {
    if !git.is_repo()? {
        git.init_repo()?;
    }
    git.add_all()?;
    let message = format!(
        "Initial commit: {} v{}",
        config.project_name, config.version
    );
    let committed = git.commit_staged(&message)?;
    debug!(committed, "git bootstrap done");
    Ok(())
}

/// Create the GitHub repository and, when an owner is configured, push.
pub fn publish_github<H: RepoHost>(
    git: &Git,
    host: &H,
    config: &SetupConfig,
) -> (StepStatus, Option<String>) {
    let request = PublishRequest {
        workdir: git.workdir().to_path_buf(),
        repo_name: config.project_name.clone(),
        private: config.github.private,
        timeout: config.command_timeout(),
        output_limit_bytes: config.output_limit_bytes,
    };

    let outcome = match host.create_repo(&request) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(err = format!("{err:#}"), "repository creation errored");
            return (
                StepStatus::Failed {
                    message: format!("{err:#}"),
                },
                None,
            );
        }
    };

    match outcome {
        PublishOutcome::CliMissing => (StepStatus::CliMissing, None),
        PublishOutcome::Failed { message } => (StepStatus::Failed { message }, None),
        PublishOutcome::Created { url } => {
            let status = match &config.github.owner {
                Some(owner) => match push_origin(git, owner, &config.project_name) {
                    Ok(()) => StepStatus::Completed,
                    Err(err) => {
                        warn!(err = format!("{err:#}"), "push to origin failed");
                        StepStatus::Failed {
                            message: format!("{err:#}"),
                        }
                    }
                },
                None => {
                    warn!("github.owner not configured, skipping remote and push");
                    StepStatus::Completed
                }
            };
            (status, url)
        }
    }
}

fn push_origin(git: &Git, owner: &str, name: &str) -> Result<()> {
    let url = format!("https://github.com/{owner}/{name}.git");
    if !git.remote_exists("origin")? {
        git.add_remote("origin", &url)?;
    }
    let branch = git.current_branch()?;
    git.push_upstream("origin", &branch)
}

/// Deploy the generated project.
pub fn deploy_project<D: Deployer>(
    deployer: &D,
    root: &Path,
    config: &SetupConfig,
) -> (StepStatus, Option<String>) {
    let request = DeployRequest {
        workdir: root.to_path_buf(),
        prod: true,
        timeout: config.command_timeout(),
        output_limit_bytes: config.output_limit_bytes,
    };

    match deployer.deploy(&request) {
        Ok(DeployOutcome::Deployed { url }) => (StepStatus::Completed, url),
        Ok(DeployOutcome::CliMissing) => (StepStatus::CliMissing, None),
        Ok(DeployOutcome::Failed { message }) => (StepStatus::Failed { message }, None),
        Err(err) => {
            warn!(err = format!("{err:#}"), "deployment errored");
            (
                StepStatus::Failed {
                    message: format!("{err:#}"),
                },
                None,
            )
        }
    }
}

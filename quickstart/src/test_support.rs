//! Test-only helpers: a temporary git repository and scripted tool adapters.

use std::collections::VecDeque;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};

use crate::io::github::{PublishOutcome, PublishRequest, RepoHost};
use crate::io::vercel::{DeployOutcome, DeployRequest, Deployer};

/// Temporary directory with an initialized git repository and a local user
/// configured, so commits work regardless of the machine's global config.
pub struct TestRepo {
    temp: tempfile::TempDir,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        run_git(temp.path(), &["init"])?;
        run_git(temp.path(), &["config", "user.email", "setup@test.invalid"])?;
        run_git(temp.path(), &["config", "user.name", "setup tests"])?;
        Ok(Self { temp })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }
}

fn run_git(root: &Path, args: &[&str]) -> Result<()> {
    let out = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .with_context(|| format!("spawn git {}", args.join(" ")))?;
    if !out.status.success() {
        return Err(anyhow!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&out.stderr).trim()
        ));
    }
    Ok(())
}

/// Host returning queued outcomes without spawning processes.
pub struct ScriptedHost {
    outcomes: Mutex<VecDeque<PublishOutcome>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedHost {
    pub fn new(outcomes: Vec<PublishOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Repo names this host was asked to create, in order.
    pub fn requested_repos(&self) -> Vec<String> {
        self.requests.lock().expect("lock").clone()
    }
}

impl RepoHost for ScriptedHost {
    fn create_repo(&self, request: &PublishRequest) -> Result<PublishOutcome> {
        self.requests
            .lock()
            .expect("lock")
            .push(request.repo_name.clone());
        self.outcomes
            .lock()
            .expect("lock")
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted publish outcome left"))
    }
}

/// Deployer returning queued outcomes without spawning processes.
pub struct ScriptedDeployer {
    outcomes: Mutex<VecDeque<DeployOutcome>>,
}

impl ScriptedDeployer {
    pub fn new(outcomes: Vec<DeployOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
        }
    }
}

impl Deployer for ScriptedDeployer {
    fn deploy(&self, _request: &DeployRequest) -> Result<DeployOutcome> {
        self.outcomes
            .lock()
            .expect("lock")
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted deploy outcome left"))
    }
}

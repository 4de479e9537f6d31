//! Git adapter for setup commands.
//!
//! The setup bootstraps a repository and publishes it deterministically, so we
//! keep a small, explicit wrapper around `git` subprocess calls.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument};

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// True when the working directory is inside a git worktree.
    pub fn is_repo(&self) -> Result<bool> {
        let out = self.run(&["rev-parse", "--is-inside-work-tree"])?;
        Ok(out.status.success() && String::from_utf8_lossy(&out.stdout).trim() == "true")
    }

    /// Initialize a repository in the working directory.
    #[instrument(skip_all)]
    pub fn init_repo(&self) -> Result<()> {
        debug!(workdir = %self.workdir.display(), "initializing repository");
        self.run_checked(&["init"])?;
        Ok(())
    }

    /// Return the current branch name (errors on detached HEAD).
    ///
    /// Uses `symbolic-ref` so it also works before the first commit.
    pub fn current_branch(&self) -> Result<String> {
        let out = self.run_capture(&["symbolic-ref", "--short", "HEAD"])?;
        let name = out.trim().to_string();
        if name.is_empty() {
            return Err(anyhow!("detached HEAD (refuse to publish)"));
        }
        Ok(name)
    }

    /// Stage all changes (respects .gitignore).
    pub fn add_all(&self) -> Result<()> {
        self.run_checked(&["add", "-A"])?;
        Ok(())
    }

    /// True if there is anything staged for commit.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let out = self.run(&["diff", "--cached", "--name-only"])?;
        Ok(!String::from_utf8_lossy(&out.stdout).trim().is_empty())
    }

    /// Commit staged changes with a message.
    ///
    /// If there are no staged changes, this returns Ok(false) and does nothing.
    #[instrument(skip_all)]
    pub fn commit_staged(&self, message: &str) -> Result<bool> {
        if !self.has_staged_changes()? {
            debug!("no staged changes, skipping commit");
            return Ok(false);
        }
        debug!("committing staged changes");
        self.run_checked(&["commit", "-m", message])?;
        Ok(true)
    }

    /// Check whether a remote with the given name is configured.
    pub fn remote_exists(&self, name: &str) -> Result<bool> {
        let status = self.run(&["remote", "get-url", name])?.status;
        Ok(status.success())
    }

    /// Add a remote.
    #[instrument(skip_all, fields(name, url))]
    pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        debug!(name, url, "adding remote");
        self.run_checked(&["remote", "add", name, url])?;
        Ok(())
    }

    /// Push the branch to a remote, setting it as upstream.
    #[instrument(skip_all, fields(remote, branch))]
    pub fn push_upstream(&self, remote: &str, branch: &str) -> Result<()> {
        debug!(remote, branch, "pushing upstream");
        self.run_checked(&["push", "-u", remote, branch])?;
        Ok(())
    }

    fn run_capture(&self, args: &[&str]) -> Result<String> {
        let output = self.run_checked(args)?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn run_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
        }
        Ok(output)
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestRepo;

    #[test]
    fn is_repo_false_for_plain_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let git = Git::new(temp.path());
        assert!(!git.is_repo().expect("is_repo"));
    }

    #[test]
    fn init_then_commit_round_trip() {
        let repo = TestRepo::new().expect("repo");
        let git = Git::new(repo.root());
        assert!(git.is_repo().expect("is_repo"));

        std::fs::write(repo.root().join("hello.txt"), "hi\n").expect("write");
        git.add_all().expect("add");
        assert!(git.has_staged_changes().expect("staged"));
        assert!(git.commit_staged("test commit").expect("commit"));
        assert!(!git.has_staged_changes().expect("staged after commit"));
    }

    #[test]
    fn commit_staged_is_noop_without_changes() {
        let repo = TestRepo::new().expect("repo");
        let git = Git::new(repo.root());
        assert!(!git.commit_staged("empty").expect("commit"));
    }

    #[test]
    fn remote_round_trip() {
        let repo = TestRepo::new().expect("repo");
        let git = Git::new(repo.root());
        assert!(!git.remote_exists("origin").expect("remote_exists"));
        git.add_remote("origin", "https://github.com/example/demo.git")
            .expect("add remote");
        assert!(git.remote_exists("origin").expect("remote_exists"));
    }
}

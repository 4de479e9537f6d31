//! GitHub publication via the `gh` CLI.
//!
//! The [`RepoHost`] trait decouples setup orchestration from the actual
//! hosting backend. Tests use scripted hosts that return predetermined
//! outcomes without spawning processes.

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, instrument, warn};

use crate::io::process::{is_missing_binary, run_command_with_timeout};

/// Parameters for a repository creation request.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Working directory for the `gh` process.
    pub workdir: PathBuf,
    /// Repository name to create.
    pub repo_name: String,
    /// Create the repository as private instead of public.
    pub private: bool,
    /// Maximum time to wait for the CLI to complete.
    pub timeout: Duration,
    /// Truncate captured output beyond this many bytes.
    pub output_limit_bytes: usize,
}

/// Outcome of a repository creation attempt.
///
/// A missing CLI is an expected condition, not an error: the setup continues
/// and reports it in the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Created { url: Option<String> },
    CliMissing,
    Failed { message: String },
}

/// Abstraction over repository hosting backends.
pub trait RepoHost {
    fn create_repo(&self, request: &PublishRequest) -> Result<PublishOutcome>;
}

/// Host that spawns `gh repo create`.
pub struct GhCli;

impl RepoHost for GhCli {
    #[instrument(skip_all, fields(repo = %request.repo_name))]
    fn create_repo(&self, request: &PublishRequest) -> Result<PublishOutcome> {
        info!(repo = %request.repo_name, "creating GitHub repository");

        let mut cmd = Command::new("gh");
        cmd.arg("repo")
            .arg("create")
            .arg(&request.repo_name)
            .arg(if request.private {
                "--private"
            } else {
                "--public"
            })
            .current_dir(&request.workdir);

        let output =
            match run_command_with_timeout(cmd, request.timeout, request.output_limit_bytes) {
                Ok(output) => output,
                Err(err) if is_missing_binary(&err) => {
                    warn!("gh CLI not found, skipping repository creation");
                    return Ok(PublishOutcome::CliMissing);
                }
                Err(err) => return Err(err),
            };

        if output.timed_out {
            return Ok(PublishOutcome::Failed {
                message: format!("gh repo create timed out after {:?}", request.timeout),
            });
        }
        if !output.status.success() {
            let stderr = output.stderr_lossy();
            warn!(exit_code = ?output.status.code(), "gh repo create failed");
            return Ok(PublishOutcome::Failed {
                message: format!("gh repo create failed: {}", stderr.trim()),
            });
        }

        let url = extract_repo_url(&output.stdout_lossy());
        debug!(url = url.as_deref().unwrap_or("<none>"), "repository created");
        Ok(PublishOutcome::Created { url })
    }
}

/// Pull the repository URL out of `gh` stdout, if it printed one.
fn extract_repo_url(stdout: &str) -> Option<String> {
    for line in stdout.lines() {
        for token in line.split_whitespace() {
            if token.starts_with("https://github.com/") {
                return Some(token.trim_end_matches('/').to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_repo_url_from_output() {
        let stdout = "✓ Created repository someone/demo on GitHub\nhttps://github.com/someone/demo\n";
        assert_eq!(
            extract_repo_url(stdout),
            Some("https://github.com/someone/demo".to_string())
        );
    }

    #[test]
    fn extract_returns_none_without_url() {
        assert_eq!(extract_repo_url("no url here\n"), None);
    }
}

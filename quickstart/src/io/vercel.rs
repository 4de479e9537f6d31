//! Deployment via the `vercel` CLI.

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, instrument, warn};

use crate::io::process::{is_missing_binary, run_command_with_timeout};

/// Parameters for a deployment request.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    /// Working directory for the `vercel` process.
    pub workdir: PathBuf,
    /// Deploy to production (`--prod`) instead of a preview.
    pub prod: bool,
    /// Maximum time to wait for the CLI to complete.
    pub timeout: Duration,
    /// Truncate captured output beyond this many bytes.
    pub output_limit_bytes: usize,
}

/// Outcome of a deployment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Deployed { url: Option<String> },
    CliMissing,
    Failed { message: String },
}

/// Abstraction over deployment backends.
pub trait Deployer {
    fn deploy(&self, request: &DeployRequest) -> Result<DeployOutcome>;
}

/// Deployer that spawns `vercel --prod --yes`.
pub struct VercelCli;

impl Deployer for VercelCli {
    #[instrument(skip_all, fields(prod = request.prod))]
    fn deploy(&self, request: &DeployRequest) -> Result<DeployOutcome> {
        info!(workdir = %request.workdir.display(), "deploying to Vercel");

        let mut cmd = Command::new("vercel");
        if request.prod {
            cmd.arg("--prod");
        }
        cmd.arg("--yes").current_dir(&request.workdir);

        let output =
            match run_command_with_timeout(cmd, request.timeout, request.output_limit_bytes) {
                Ok(output) => output,
                Err(err) if is_missing_binary(&err) => {
                    warn!("vercel CLI not found, skipping deployment");
                    return Ok(DeployOutcome::CliMissing);
                }
                Err(err) => return Err(err),
            };

        if output.timed_out {
            return Ok(DeployOutcome::Failed {
                message: format!("vercel timed out after {:?}", request.timeout),
            });
        }
        if !output.status.success() {
            warn!(exit_code = ?output.status.code(), "vercel deployment failed");
            return Ok(DeployOutcome::Failed {
                message: format!(
                    "vercel exited with status {:?}: {}",
                    output.status.code(),
                    output.stderr_lossy().trim()
                ),
            });
        }

        // The CLI prints the deployment URL on stdout; scan for the first
        // line that looks like one.
        let url = extract_deployment_url(&output.stdout_lossy());
        debug!(url = url.as_deref().unwrap_or("<none>"), "deployment finished");
        Ok(DeployOutcome::Deployed { url })
    }
}

/// Find the first `https://*.vercel.app` URL in CLI stdout.
fn extract_deployment_url(stdout: &str) -> Option<String> {
    for line in stdout.lines() {
        if !(line.contains("https://") && line.contains(".vercel.app")) {
            continue;
        }
        for token in line.split_whitespace() {
            if token.starts_with("https://") && token.contains(".vercel.app") {
                return Some(token.to_string());
            }
        }
        return Some(line.trim().to_string());
    }
    None
}

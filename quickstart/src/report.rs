//! Product output: banner and completion summary text.
//!
//! Pure string builders; `main` decides when to print them.

use std::fmt::Write as _;

use crate::io::config::SetupConfig;
use crate::setup::{SetupOutcome, StepStatus};

/// Banner shown before `quickstart run` asks for confirmation.
pub fn banner(config: &SetupConfig) -> String {
    let mut out = String::new();
    out.push_str(
        "\
╔══════════════════════════════════════════════════════════════╗
║        AUTONOMOUS REVENUE SYSTEM - ONE-CLICK SETUP           ║
╚══════════════════════════════════════════════════════════════╝
",
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  project:       {}", config.project_name);
    let _ = writeln!(out, "  version:       {}", config.version);
    let _ = writeln!(out, "  daily target:  ${}", config.daily_target);
    let _ = writeln!(out);
    out.push_str(
        "\
This setup will:
  - write the complete project structure
  - initialize a git repository and commit the files
  - create a GitHub repository (needs the `gh` CLI)
  - deploy to Vercel (needs the `vercel` CLI)
",
    );
    out
}

/// Summary printed after `quickstart run` finishes.
pub fn completion_summary(outcome: &SetupOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Setup complete.");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  files:   {} written, {} skipped",
        outcome.report.written.len(),
        outcome.report.skipped.len()
    );
    let _ = writeln!(out, "  git:     {}", outcome.git);
    let _ = writeln!(out, "  github:  {}", step_with_url(&outcome.github, &outcome.github_url));
    let _ = writeln!(out, "  deploy:  {}", step_with_url(&outcome.deploy, &outcome.deploy_url));
    let _ = writeln!(out);
    out.push_str(
        "\
Next steps:
  1. Copy .env.example to .env and add your API keys
  2. Configure environment variables in the Vercel dashboard
  3. Open the dashboard and press LAUNCH SYSTEM
",
    );
    out
}

fn step_with_url(status: &StepStatus, url: &Option<String>) -> String {
    match url {
        Some(url) => format!("{status} ({url})"),
        None => status.to_string(),
    }
}

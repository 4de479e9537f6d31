//! One-click project scaffolding and deployment CLI.
//!
//! `quickstart run` writes the complete project to the current directory,
//! bootstraps git, creates a GitHub repository, and deploys to Vercel. The
//! individual steps are also exposed as their own subcommands.

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use quickstart::core::templates::build_manifest;
use quickstart::exit_codes;
use quickstart::io::config::{SetupConfig, load_config};
use quickstart::io::git::Git;
use quickstart::io::github::GhCli;
use quickstart::io::scaffold::{ScaffoldOptions, scaffold_project};
use quickstart::io::vercel::VercelCli;
use quickstart::logging;
use quickstart::report;
use quickstart::setup::{SetupOptions, bootstrap_git, deploy_project, publish_github, run_setup};
use quickstart::verify::{DriftKind, verify_project};

#[derive(Parser)]
#[command(
    name = "quickstart",
    version,
    about = "One-click project scaffolding and deployment"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scaffold, commit, publish, and deploy in one pass.
    Run {
        /// Overwrite existing generated files.
        #[arg(short, long)]
        force: bool,
        /// Proceed without waiting for confirmation.
        #[arg(short = 'y', long)]
        yes: bool,
        /// Skip the GitHub repository step.
        #[arg(long)]
        skip_github: bool,
        /// Skip the Vercel deployment step.
        #[arg(long)]
        skip_deploy: bool,
    },
    /// Write the project files without touching git or deployment.
    Init {
        /// Overwrite existing generated files.
        #[arg(short, long)]
        force: bool,
    },
    /// Compare generated files on disk against the manifest.
    Verify,
    /// Initialize git, create the GitHub repository, and push.
    Publish,
    /// Deploy the project to Vercel.
    Deploy,
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let root = std::env::current_dir().context("resolve current directory")?;
    let config = load_config(&root.join("quickstart.toml"))?;

    match cli.command {
        Command::Run {
            force,
            yes,
            skip_github,
            skip_deploy,
        } => cmd_run(
            &root,
            &config,
            SetupOptions {
                force,
                skip_github,
                skip_deploy,
            },
            yes,
        ),
        Command::Init { force } => cmd_init(&root, &config, force),
        Command::Verify => cmd_verify(&root, &config),
        Command::Publish => cmd_publish(&root, &config),
        Command::Deploy => cmd_deploy(&root, &config),
    }
}

fn cmd_run(root: &Path, config: &SetupConfig, options: SetupOptions, yes: bool) -> Result<i32> {
    println!("{}", report::banner(config));
    if !yes && !confirm()? {
        println!("Setup cancelled.");
        return Ok(exit_codes::INVALID);
    }

    let outcome = run_setup(root, config, &GhCli, &VercelCli, &options)?;
    println!("{}", report::completion_summary(&outcome));

    if outcome.fully_succeeded() {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::PARTIAL)
    }
}

fn cmd_init(root: &Path, config: &SetupConfig, force: bool) -> Result<i32> {
    let manifest = build_manifest(&config.project_settings())?;
    let report = scaffold_project(root, &manifest, &ScaffoldOptions { force })?;

    for path in &report.written {
        println!("  created: {}", path.display());
    }
    for path in &report.skipped {
        println!("  exists:  {}", path.display());
    }
    println!(
        "{} files written, {} skipped",
        report.written.len(),
        report.skipped.len()
    );
    Ok(exit_codes::OK)
}

fn cmd_verify(root: &Path, config: &SetupConfig) -> Result<i32> {
    let manifest = build_manifest(&config.project_settings())?;
    let outcome = verify_project(root, &manifest)?;

    for drift in &outcome.drift {
        let label = match drift.kind {
            DriftKind::Missing => "missing",
            DriftKind::Mismatch => "modified",
        };
        println!("  {label}: {}", drift.path.display());
    }
    if outcome.is_clean() {
        println!("{} files verified", outcome.checked);
        Ok(exit_codes::OK)
    } else {
        println!(
            "{} of {} files drifted",
            outcome.drift.len(),
            outcome.checked
        );
        Ok(exit_codes::DRIFT)
    }
}

fn cmd_publish(root: &Path, config: &SetupConfig) -> Result<i32> {
    config.validate()?;
    let git = Git::new(root);
    let git_status = bootstrap_git(&git, config);
    println!("  git:     {git_status}");

    let (github, url) = publish_github(&git, &GhCli, config);
    match &url {
        Some(url) => println!("  github:  {github} ({url})"),
        None => println!("  github:  {github}"),
    }

    if git_status.is_failure() || github.is_failure() {
        Ok(exit_codes::PARTIAL)
    } else {
        Ok(exit_codes::OK)
    }
}

fn cmd_deploy(root: &Path, config: &SetupConfig) -> Result<i32> {
    config.validate()?;
    let (status, url) = deploy_project(&VercelCli, root, config);
    match &url {
        Some(url) => println!("  deploy:  {status} (live at {url})"),
        None => println!("  deploy:  {status}"),
    }

    if status.is_failure() {
        Ok(exit_codes::PARTIAL)
    } else {
        Ok(exit_codes::OK)
    }
}

/// Wait for the user to press Enter. EOF counts as cancellation, matching
/// the original script's Ctrl+C behavior.
fn confirm() -> Result<bool> {
    println!("Press Enter to continue (Ctrl+C to cancel)...");
    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read confirmation")?;
    Ok(read > 0)
}

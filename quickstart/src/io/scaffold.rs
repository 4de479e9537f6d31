//! Writes the project manifest to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, instrument};

use crate::core::manifest::Manifest;

/// Options for `scaffold_project`.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// If true, overwrite existing files.
    pub force: bool,
}

/// Per-path report of what the scaffold pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Write every manifest entry under `root`.
///
/// Existing files are left untouched unless `options.force` is set; the
/// report records which paths were written and which were skipped.
#[instrument(skip_all, fields(root = %root.display(), force = options.force))]
pub fn scaffold_project(
    root: &Path,
    manifest: &Manifest,
    options: &ScaffoldOptions,
) -> Result<ScaffoldReport> {
    fs::create_dir_all(root).with_context(|| format!("create directory {}", root.display()))?;

    let mut report = ScaffoldReport::default();
    for spec in manifest.files() {
        let target = root.join(&spec.path);
        if target.is_dir() {
            return Err(anyhow!(
                "cannot write {}: a directory is in the way",
                target.display()
            ));
        }
        if target.exists() && !options.force {
            debug!(path = %spec.path.display(), "exists, skipping");
            report.skipped.push(spec.path.clone());
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&target, &spec.contents)
            .with_context(|| format!("write file {}", target.display()))?;
        debug!(path = %spec.path.display(), "written");
        report.written.push(spec.path.clone());
    }

    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        "scaffold complete"
    );
    Ok(report)
}

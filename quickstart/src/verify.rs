//! Verification of generated files against the manifest.
//!
//! `quickstart verify` re-renders the manifest and compares it to the files
//! on disk; any missing or modified file is reported as drift. The rendered
//! JSON configs are also checked structurally so a template regression is
//! caught even before anything hits disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use jsonschema::Draft;
use serde_json::Value;

use crate::core::manifest::Manifest;

const VERCEL_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/vercel.schema.json"
));

/// Why a path counts as drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftKind {
    Missing,
    Mismatch,
}

/// A single drifted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drift {
    pub path: PathBuf,
    pub kind: DriftKind,
}

/// Outcome of `quickstart verify`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyOutcome {
    pub checked: usize,
    pub drift: Vec<Drift>,
}

impl VerifyOutcome {
    pub fn is_clean(&self) -> bool {
        self.drift.is_empty()
    }
}

/// Compare every manifest entry against the file on disk under `root`.
pub fn verify_project(root: &Path, manifest: &Manifest) -> Result<VerifyOutcome> {
    check_rendered_configs(manifest)?;

    let mut outcome = VerifyOutcome::default();
    for spec in manifest.files() {
        outcome.checked += 1;
        let target = root.join(&spec.path);
        if !target.is_file() {
            outcome.drift.push(Drift {
                path: spec.path.clone(),
                kind: DriftKind::Missing,
            });
            continue;
        }
        // Byte comparison so a tamper that leaves invalid UTF-8 behind still
        // counts as drift rather than a read error.
        let contents =
            fs::read(&target).with_context(|| format!("read {}", target.display()))?;
        if contents != spec.contents.as_bytes() {
            outcome.drift.push(Drift {
                path: spec.path.clone(),
                kind: DriftKind::Mismatch,
            });
        }
    }
    Ok(outcome)
}

/// Structural checks on the rendered JSON configs.
///
/// A failure here is a template bug, not user drift, so it is a hard error.
fn check_rendered_configs(manifest: &Manifest) -> Result<()> {
    let vercel = manifest
        .get("vercel.json")
        .context("manifest missing vercel.json")?;
    let instance: Value =
        serde_json::from_str(&vercel.contents).context("parse rendered vercel.json")?;
    validate_schema(&instance, VERCEL_SCHEMA).context("validate rendered vercel.json")?;

    let pkg = manifest
        .get("package.json")
        .context("manifest missing package.json")?;
    let _: Value = serde_json::from_str(&pkg.contents).context("parse rendered package.json")?;
    Ok(())
}

/// Validate a JSON instance against a JSON Schema (Draft 2020-12).
fn validate_schema(instance: &Value, schema_raw: &str) -> Result<()> {
    let schema: Value = serde_json::from_str(schema_raw).context("parse schema json")?;
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .context("compile json schema")?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!("schema validation failed:\n- {}", messages.join("\n- "));
    }
    Ok(())
}

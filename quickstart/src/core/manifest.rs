//! The file manifest: the full set of (relative path, contents) pairs the
//! setup writes, built once and validated before any file touches disk.

use std::path::{Component, Path, PathBuf};

use anyhow::{Result, anyhow};

/// A single file to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    /// Path relative to the project root.
    pub path: PathBuf,
    /// Full file contents, written verbatim.
    pub contents: String,
}

impl FileSpec {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// The ordered set of files the setup writes.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    files: Vec<FileSpec>,
}

impl Manifest {
    /// Build a manifest, rejecting any invariant violation up front.
    pub fn new(files: Vec<FileSpec>) -> Result<Self> {
        let manifest = Self { files };
        let errors = manifest.invariant_errors();
        if !errors.is_empty() {
            return Err(anyhow!(
                "manifest invariant violations:\n- {}",
                errors.join("\n- ")
            ));
        }
        Ok(manifest)
    }

    pub fn files(&self) -> &[FileSpec] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Look up a file by its relative path.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&FileSpec> {
        let path = path.as_ref();
        self.files.iter().find(|spec| spec.path == path)
    }

    /// Collect invariant violations: every path must be relative, stay inside
    /// the project root, and appear at most once.
    fn invariant_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen: Vec<&Path> = Vec::new();

        for spec in &self.files {
            let path = spec.path.as_path();
            if path.as_os_str().is_empty() {
                errors.push("empty path".to_string());
                continue;
            }
            if path.is_absolute() {
                errors.push(format!("absolute path '{}'", path.display()));
            }
            if path
                .components()
                .any(|c| matches!(c, Component::ParentDir))
            {
                errors.push(format!("path '{}' escapes the root", path.display()));
            }
            if seen.contains(&path) {
                errors.push(format!("duplicate path '{}'", path.display()));
            }
            seen.push(path);
        }

        errors
    }
}

/// Validate that a project name is safe for repository names and deployment
/// URLs: non-empty, lowercase `[a-z0-9._-]` only.
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow!("project name must not be empty"));
    }
    if name
        .chars()
        .any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_' || c == '-'))
    {
        return Err(anyhow!(
            "project name must be [a-z0-9._-] only (got '{name}')"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_accepts_relative_unique_paths() {
        let manifest = Manifest::new(vec![
            FileSpec::new("api/launch.py", "a"),
            FileSpec::new("vercel.json", "b"),
        ])
        .expect("manifest");
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.get("vercel.json").expect("entry").contents, "b");
    }

    #[test]
    fn manifest_rejects_duplicate_paths() {
        let err = Manifest::new(vec![
            FileSpec::new("vercel.json", "a"),
            FileSpec::new("vercel.json", "b"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate path"));
    }

    #[test]
    fn manifest_rejects_absolute_and_escaping_paths() {
        let err = Manifest::new(vec![
            FileSpec::new("/etc/passwd", "a"),
            FileSpec::new("../outside.txt", "b"),
        ])
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("absolute path"));
        assert!(msg.contains("escapes the root"));
    }

    #[test]
    fn validate_project_name_accepts_slug() {
        validate_project_name("autonomous-revenue-system").expect("valid name");
    }

    #[test]
    fn validate_project_name_rejects_bad_chars() {
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("Bad Name").is_err());
        assert!(validate_project_name("owner/repo").is_err());
    }
}

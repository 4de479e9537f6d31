//! Setup configuration loaded from `quickstart.toml` in the project root.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::core::manifest::validate_project_name;
use crate::core::templates::ProjectSettings;

/// Setup configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to the original project's values.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SetupConfig {
    /// Project slug, used for the repository and Vercel project name.
    pub project_name: String,

    /// Version stamped into generated files.
    pub version: String,

    /// Daily revenue target in whole dollars.
    pub daily_target: u64,

    /// Whether the generated config enables automatic scaling.
    pub auto_scaling: bool,

    /// Wall-clock budget for each external CLI invocation, in seconds.
    pub command_timeout_secs: u64,

    /// Truncate captured CLI stdout/stderr beyond this many bytes.
    pub output_limit_bytes: usize,

    pub github: GithubConfig,
    pub deploy: DeployConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GithubConfig {
    /// Run `gh repo create` during `quickstart run`.
    pub enabled: bool,
    /// Account or organization that owns the remote. Without it the remote
    /// and push are skipped.
    pub owner: Option<String>,
    /// Create the repository as private instead of public.
    pub private: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeployConfig {
    /// Run `vercel --prod --yes` during `quickstart run`.
    pub enabled: bool,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            owner: None,
            private: false,
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            project_name: "autonomous-revenue-system".to_string(),
            version: "2.0.0".to_string(),
            daily_target: 1000,
            auto_scaling: true,
            command_timeout_secs: 10 * 60,
            output_limit_bytes: 200_000,
            github: GithubConfig::default(),
            deploy: DeployConfig::default(),
        }
    }
}

impl SetupConfig {
    pub fn validate(&self) -> Result<()> {
        validate_project_name(&self.project_name)?;
        if self.version.trim().is_empty() {
            return Err(anyhow!("version must not be empty"));
        }
        if self.daily_target == 0 {
            return Err(anyhow!("daily_target must be > 0"));
        }
        if self.command_timeout_secs == 0 {
            return Err(anyhow!("command_timeout_secs must be > 0"));
        }
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        if let Some(owner) = &self.github.owner
            && owner.trim().is_empty()
        {
            return Err(anyhow!("github.owner must not be blank when set"));
        }
        Ok(())
    }

    /// The settings slice that flows into template rendering.
    pub fn project_settings(&self) -> ProjectSettings {
        ProjectSettings {
            name: self.project_name.clone(),
            version: self.version.clone(),
            daily_target: self.daily_target,
            auto_scaling: self.auto_scaling,
        }
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SetupConfig::default()`.
pub fn load_config(path: &Path) -> Result<SetupConfig> {
    if !path.exists() {
        let cfg = SetupConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SetupConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, SetupConfig::default());
    }

    #[test]
    fn partial_toml_overrides_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("quickstart.toml");
        fs::write(
            &path,
            "project_name = \"demo\"\ndaily_target = 500\n\n[github]\nowner = \"someone\"\n",
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.project_name, "demo");
        assert_eq!(cfg.daily_target, 500);
        assert_eq!(cfg.github.owner.as_deref(), Some("someone"));
        assert!(cfg.deploy.enabled, "unset sections keep defaults");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero_target = SetupConfig {
            daily_target: 0,
            ..SetupConfig::default()
        };
        assert!(zero_target.validate().is_err());

        let bad_name = SetupConfig {
            project_name: "Bad Name".to_string(),
            ..SetupConfig::default()
        };
        assert!(bad_name.validate().is_err());

        let blank_owner = SetupConfig {
            github: GithubConfig {
                owner: Some("  ".to_string()),
                ..GithubConfig::default()
            },
            ..SetupConfig::default()
        };
        assert!(blank_owner.validate().is_err());
    }
}

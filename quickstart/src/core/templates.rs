//! Template rendering for the generated project files.
//!
//! Files that carry project settings (name, version, revenue target) are
//! minijinja templates; the rest are embedded verbatim. The GitHub workflow
//! is always verbatim because Actions' own `${{ }}` syntax collides with
//! template delimiters.

use anyhow::{Context, Result};
use minijinja::{Environment, context};

use super::manifest::{FileSpec, Manifest, validate_project_name};

const LAUNCH_API: &str = include_str!("templates/launch.py");
const SCALING_API: &str = include_str!("templates/scaling.py");
const STATUS_API_TEMPLATE: &str = include_str!("templates/status.py");
const AI_LEARNING_API: &str = include_str!("templates/ai_learning.py");
const DASHBOARD_HTML: &str = include_str!("templates/index.html");
const SCALING_ENGINE: &str = include_str!("templates/scaling_engine.py");
const CONFIG_UTILS_TEMPLATE: &str = include_str!("templates/config.py");
const VERCEL_CONFIG_TEMPLATE: &str = include_str!("templates/vercel.json");
const PACKAGE_JSON_TEMPLATE: &str = include_str!("templates/package.json");
const REQUIREMENTS: &str = include_str!("templates/requirements.txt");
const ENV_EXAMPLE_TEMPLATE: &str = include_str!("templates/env.example");
const README_TEMPLATE: &str = include_str!("templates/readme.md");
const DEPLOY_WORKFLOW: &str = include_str!("templates/deploy.yml");
const DEPLOY_SCRIPT: &str = include_str!("templates/deploy.py");

/// Settings threaded into every rendered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    /// Project slug, used for repository names and the Vercel project.
    pub name: String,
    /// Version stamped into `package.json` and the README.
    pub version: String,
    /// Daily revenue target in whole dollars.
    pub daily_target: u64,
    /// Whether the generated config enables automatic scaling.
    pub auto_scaling: bool,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            name: "autonomous-revenue-system".to_string(),
            version: "2.0.0".to_string(),
            daily_target: 1000,
            auto_scaling: true,
        }
    }
}

/// Template engine wrapper around minijinja.
struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    fn new() -> Self {
        let mut env = Environment::new();
        for (name, source) in [
            ("status.py", STATUS_API_TEMPLATE),
            ("config.py", CONFIG_UTILS_TEMPLATE),
            ("vercel.json", VERCEL_CONFIG_TEMPLATE),
            ("package.json", PACKAGE_JSON_TEMPLATE),
            ("env.example", ENV_EXAMPLE_TEMPLATE),
            ("readme.md", README_TEMPLATE),
        ] {
            env.add_template(name, source)
                .expect("embedded template should be valid");
        }
        Self { env }
    }

    fn render(&self, name: &str, settings: &ProjectSettings) -> Result<String> {
        let template = self.env.get_template(name)?;
        let rendered = template
            .render(context! {
                project_name => settings.name,
                version => settings.version,
                daily_target => settings.daily_target,
                auto_scaling => settings.auto_scaling,
            })
            .with_context(|| format!("render template '{name}'"))?;
        Ok(rendered)
    }
}

/// Build the full file manifest for `settings`.
///
/// The file set matches the original project layout: Vercel API stubs, the
/// dashboard page, the core/utils Python packages, and deployment config.
pub fn build_manifest(settings: &ProjectSettings) -> Result<Manifest> {
    validate_project_name(&settings.name)?;
    let engine = TemplateEngine::new();

    let rendered = |target: &str, template: &str| -> Result<FileSpec> {
        Ok(FileSpec::new(target, engine.render(template, settings)?))
    };

    let files = vec![
        FileSpec::new("api/launch.py", LAUNCH_API),
        FileSpec::new("api/scaling.py", SCALING_API),
        rendered("api/status.py", "status.py")?,
        FileSpec::new("api/ai-learning.py", AI_LEARNING_API),
        FileSpec::new("frontend/index.html", DASHBOARD_HTML),
        FileSpec::new("core/__init__.py", ""),
        FileSpec::new("core/scaling_engine.py", SCALING_ENGINE),
        FileSpec::new("utils/__init__.py", ""),
        rendered("utils/config.py", "config.py")?,
        rendered("vercel.json", "vercel.json")?,
        rendered("package.json", "package.json")?,
        FileSpec::new("requirements.txt", REQUIREMENTS),
        rendered(".env.example", "env.example")?,
        rendered("README.md", "readme.md")?,
        FileSpec::new(".github/workflows/deploy.yml", DEPLOY_WORKFLOW),
        FileSpec::new("deploy.py", DEPLOY_SCRIPT),
    ];

    Manifest::new(files)
}

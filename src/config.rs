//! Site configuration module.
//!
//! Every path the build touches, the number of projects on the page, and the
//! publishing behavior live in one [`SiteConfig`]. It is loaded once at startup
//! from an optional `folio.toml` in the site root and passed by reference into
//! every pipeline stage. Nothing else in the crate hard-codes a path.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! javascript = "templates/js/main.js"
//! presentation = "presentation.md"
//! youtube_icon = "images/yt_icon_red_digital.png"
//!
//! # Concatenated in this order into {{ css }}
//! css = [
//!     "templates/css/base.css",
//!     "templates/css/hero.css",
//!     "templates/css/projects.css",
//!     "templates/css/modal.css",
//! ]
//!
//! [templates]
//! main = "templates/index.html"
//! modal = "templates/modal.html"
//! hero = "templates/hero.html"
//! projects = "templates/projects.html"
//!
//! [projects]
//! dir = "projects"          # Holds 1.md, 2.md, ... and N-slot.ext images
//! count = 4                 # Projects 1..=count are rendered
//! image_extensions = ["png", "jpg", "jpeg", "webp", "gif"]
//!
//! [output]
//! page = "index.html"
//! assets_dir = "public/projects"
//! image_base_url = "projects"
//!
//! [resume]
//! href = "cv.pdf"
//! file = "cv.pdf"           # Copied next to the page when publishing
//! label = "Download Resume"
//!
//! [publish]
//! # target = "../my-website"
//! push = false
//! commit_prefix = "Update website"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Stock defaults are serialized to a TOML table and
//! the user file is merged on top, so only overridden keys need to appear:
//!
//! ```toml
//! [projects]
//! count = 6
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional config file looked up in the site root.
pub const CONFIG_FILE: &str = "folio.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `folio.toml`.
///
/// All paths are relative to the site root passed on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Template documents with placeholder tokens.
    pub templates: TemplatesConfig,
    /// Style documents, concatenated in order into `{{ css }}`.
    pub css: Vec<PathBuf>,
    /// Script document substituted into `{{ javascript }}`.
    pub javascript: PathBuf,
    /// Markdown rendered into the hero block as `{{ presentation }}`.
    pub presentation: PathBuf,
    /// Icon shown inside the video link of a project card.
    pub youtube_icon: String,
    /// Project sources and image lookup.
    pub projects: ProjectsConfig,
    /// Where the build writes its artifacts.
    pub output: OutputConfig,
    /// Résumé download control and document.
    pub resume: ResumeConfig,
    /// Publishing into an external website repository.
    pub publish: PublishConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            templates: TemplatesConfig::default(),
            css: vec![
                "templates/css/base.css".into(),
                "templates/css/hero.css".into(),
                "templates/css/projects.css".into(),
                "templates/css/modal.css".into(),
            ],
            javascript: "templates/js/main.js".into(),
            presentation: "presentation.md".into(),
            youtube_icon: "images/yt_icon_red_digital.png".to_string(),
            projects: ProjectsConfig::default(),
            output: OutputConfig::default(),
            resume: ResumeConfig::default(),
            publish: PublishConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.projects.count == 0 {
            return Err(ConfigError::Validation(
                "projects.count must be at least 1".into(),
            ));
        }
        if self.projects.image_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "projects.image_extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self
            .projects
            .image_extensions
            .iter()
            .find(|e| e.is_empty() || e.contains('.'))
        {
            return Err(ConfigError::Validation(format!(
                "projects.image_extensions entry {ext:?} must be a bare extension like \"png\""
            )));
        }
        if self.css.is_empty() {
            return Err(ConfigError::Validation("css must list at least one file".into()));
        }
        Ok(())
    }

    /// Project identifiers in render order (`1..=count`).
    pub fn project_ids(&self) -> impl Iterator<Item = u32> {
        1..=self.projects.count
    }

    /// Path of the markdown file describing project `id`.
    pub fn project_file(&self, root: &Path, id: u32) -> PathBuf {
        root.join(&self.projects.dir).join(format!("{id}.md"))
    }

    /// Every input document the build cannot run without, in load order.
    pub fn required_inputs(&self, root: &Path) -> Vec<PathBuf> {
        let t = &self.templates;
        let mut inputs: Vec<PathBuf> = [&t.main, &t.modal, &t.hero, &t.projects]
            .into_iter()
            .map(|p| root.join(p))
            .collect();
        inputs.extend(self.css.iter().map(|p| root.join(p)));
        inputs.push(root.join(&self.javascript));
        inputs.push(root.join(&self.presentation));
        inputs.extend(self.project_ids().map(|id| self.project_file(root, id)));
        inputs
    }
}

/// Template document locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    pub main: PathBuf,
    pub modal: PathBuf,
    pub hero: PathBuf,
    pub projects: PathBuf,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            main: "templates/index.html".into(),
            modal: "templates/modal.html".into(),
            hero: "templates/hero.html".into(),
            projects: "templates/projects.html".into(),
        }
    }
}

/// Project sources and image naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectsConfig {
    /// Directory holding `N.md` files and `N-slot.ext` images.
    pub dir: PathBuf,
    /// Number of projects on the page; ids run from 1 to `count`.
    pub count: u32,
    /// Extensions tried, in order, when probing for `N-slot.ext`.
    pub image_extensions: Vec<String>,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            dir: "projects".into(),
            count: 4,
            image_extensions: ["png", "jpg", "jpeg", "webp", "gif"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

/// Build artifact locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Assembled page.
    pub page: PathBuf,
    /// Directory project images are copied into.
    pub assets_dir: PathBuf,
    /// URL prefix used for image `src` attributes in the page.
    pub image_base_url: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            page: "index.html".into(),
            assets_dir: "public/projects".into(),
            image_base_url: "projects".to_string(),
        }
    }
}

/// Résumé download control.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResumeConfig {
    /// Link target of the download button.
    pub href: String,
    /// Document copied into the publish target, if it exists.
    pub file: PathBuf,
    /// Button text, also used as its accessible label.
    pub label: String,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            href: "cv.pdf".to_string(),
            file: "cv.pdf".into(),
            label: "Download Resume".to_string(),
        }
    }
}

/// Publishing into an external website repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    /// Website repository the page is copied into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
    /// Run `git push` after committing. Off by default: published changes
    /// stay as local commits.
    pub push: bool,
    /// Commit message prefix; a timestamp is appended.
    pub commit_prefix: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            target: None,
            push: false,
            commit_prefix: "Update website".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `folio.toml` from the site root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config for a site root: stock defaults, user overrides, validation.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `folio.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Paths are relative to the site root.
# Unknown keys will cause an error.

# Script substituted into {{ javascript }}.
javascript = "templates/js/main.js"

# Markdown rendered into the hero block as {{ presentation }}.
presentation = "presentation.md"

# Icon shown inside a project's video link.
youtube_icon = "images/yt_icon_red_digital.png"

# Style documents, concatenated in this order into {{ css }}.
css = [
    "templates/css/base.css",
    "templates/css/hero.css",
    "templates/css/projects.css",
    "templates/css/modal.css",
]

# ---------------------------------------------------------------------------
# Templates
# ---------------------------------------------------------------------------
[templates]
main = "templates/index.html"
modal = "templates/modal.html"
hero = "templates/hero.html"
projects = "templates/projects.html"

# ---------------------------------------------------------------------------
# Projects
# ---------------------------------------------------------------------------
[projects]
# Holds 1.md .. N.md plus images named N-slot.ext (e.g. 2-1.png).
dir = "projects"

# Projects 1..=count are rendered, in ascending order.
count = 4

# Tried in this order when looking for N-slot.ext; first hit wins.
image_extensions = ["png", "jpg", "jpeg", "webp", "gif"]

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
page = "index.html"

# Project images are copied here before the page is assembled.
assets_dir = "public/projects"

# Prefix for image src attributes in the generated page.
image_base_url = "projects"

# ---------------------------------------------------------------------------
# Resume (only used with --resume / --publish)
# ---------------------------------------------------------------------------
[resume]
href = "cv.pdf"
file = "cv.pdf"
# Button text, also used as its aria-label.
label = "Download Resume"

# ---------------------------------------------------------------------------
# Publishing (only used with --publish)
# ---------------------------------------------------------------------------
[publish]
# Website repository to copy the page into. Overridden by --target.
# target = "../my-website"

# Push after committing. Disabled: commits stay local until pushed by hand.
push = false

commit_prefix = "Update website"
"##
}

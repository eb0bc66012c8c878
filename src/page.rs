//! Page assembly.
//!
//! Builds the single output page from the template documents and the project
//! files. Every template is filled by [`template::render`] against its own
//! token map, innermost first, so no fill ever sees tokens produced by
//! another:
//!
//! ```text
//! hero.html      ← presentation, resume_button
//! modal.html     ← modal_id, project_title, project_tech, modal_body   (× N)
//! projects.html  ← project_N_github / _title / _description /
//!                  _youtube_link / _image                              (all N)
//! index.html     ← css, javascript, hero, projects, modals, project_N_*
//! ```
//!
//! Tokens nobody supplies stay in the page as literal text and are collected
//! in [`AssembledPage::unresolved`]; they never fail the build.

use crate::assets::{self, AssetError, CopyReport};
use crate::config::SiteConfig;
use crate::images::{ImageLocator, render_cover_image};
use crate::markdown;
use crate::modal;
use crate::project::{self, ProjectError, ProjectRecord};
use crate::template::{self, Rendered, Values, escape};
use maud::html;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Required input not found: {0}")]
    MissingInput(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),
    #[error("Asset error: {0}")]
    Assets(#[from] AssetError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Every text input of the page, loaded up front.
#[derive(Debug, Clone, Default)]
pub struct Templates {
    pub main: String,
    pub modal: String,
    pub hero: String,
    pub projects: String,
    /// Style documents joined in configured order.
    pub css: String,
    pub javascript: String,
    /// Presentation markdown, not yet converted.
    pub presentation: String,
}

fn read_input(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            BuildError::MissingInput(path.to_path_buf())
        } else {
            BuildError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

impl Templates {
    pub fn load(config: &SiteConfig, root: &Path) -> Result<Self, BuildError> {
        let t = &config.templates;
        let css = config
            .css
            .iter()
            .map(|p| read_input(&root.join(p)))
            .collect::<Result<Vec<_>, _>>()?
            .join("\n\n");
        Ok(Self {
            main: read_input(&root.join(&t.main))?,
            modal: read_input(&root.join(&t.modal))?,
            hero: read_input(&root.join(&t.hero))?,
            projects: read_input(&root.join(&t.projects))?,
            css,
            javascript: read_input(&root.join(&config.javascript))?,
            presentation: read_input(&root.join(&config.presentation))?,
        })
    }
}

/// Per-run switches from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Insert the résumé download control into the hero block.
    pub resume: bool,
}

/// What ended up on the page for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: u32,
    pub title: String,
    pub tech: String,
    pub has_video: bool,
    pub has_cover: bool,
}

/// A token left in the output because nothing supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedToken {
    /// Which template it came from (`index`, `hero`, `projects`, `modal-N`).
    pub template: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct AssembledPage {
    pub html: String,
    pub projects: Vec<ProjectSummary>,
    pub unresolved: Vec<UnresolvedToken>,
}

/// Result of a full build: assets copied, page assembled and written.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub assets: CopyReport,
    pub page: AssembledPage,
    pub output: PathBuf,
}

/// Résumé download button, or nothing.
pub fn render_resume_button(href: &str, label: &str, enabled: bool) -> String {
    html! {
        @if enabled {
            a href=(href) class="resume-button" download aria-label=(label) {
                (label)
            }
        }
    }
    .into_string()
}

/// Video link shown on a project card, or nothing when there is no URL.
pub fn render_youtube_link(url: &str, icon: &str) -> String {
    html! {
        @if !url.is_empty() {
            a href=(url) target="_blank" class="youtube-link" onclick="event.stopPropagation()" {
                img src=(icon) alt="YouTube";
            }
        }
    }
    .into_string()
}

fn collect_unresolved(into: &mut Vec<UnresolvedToken>, template: &str, rendered: &Rendered) {
    into.extend(rendered.unresolved.iter().map(|token| UnresolvedToken {
        template: template.to_string(),
        token: token.clone(),
    }));
}

/// Assemble the page from loaded templates and parsed projects.
///
/// `projects` must be in ascending id order; that order is kept for the
/// modals.
pub fn assemble(
    templates: &Templates,
    projects: &[(u32, ProjectRecord)],
    locator: &ImageLocator,
    config: &SiteConfig,
    options: BuildOptions,
) -> AssembledPage {
    let mut unresolved = Vec::new();

    let mut hero_values = Values::new();
    hero_values
        .insert("presentation", markdown::to_html(&templates.presentation))
        .insert(
            "resume_button",
            render_resume_button(&config.resume.href, &config.resume.label, options.resume),
        );
    let hero = template::render(&templates.hero, &hero_values);
    collect_unresolved(&mut unresolved, "hero", &hero);

    let mut values = Values::new();
    values
        .insert("css", templates.css.as_str())
        .insert("javascript", templates.javascript.as_str())
        .insert("hero", hero.output);

    let mut modals = Vec::with_capacity(projects.len());
    let mut summaries = Vec::with_capacity(projects.len());

    for (id, record) in projects {
        let modal = modal::render_modal(&templates.modal, *id, record, locator);
        collect_unresolved(&mut unresolved, &modal::modal_id(*id), &modal);
        modals.push(modal.output);

        let cover = render_cover_image(locator, *id, &record.title).into_string();
        let has_cover = !cover.is_empty();

        values
            .insert(format!("project_{id}_github"), escape(&record.github_url))
            .insert(format!("project_{id}_title"), escape(&record.title))
            .insert(format!("project_{id}_description"), escape(&record.description))
            .insert(
                format!("project_{id}_youtube_link"),
                render_youtube_link(&record.youtube_url, &config.youtube_icon),
            )
            .insert(format!("project_{id}_image"), cover);

        summaries.push(ProjectSummary {
            id: *id,
            title: record.title.clone(),
            tech: record.tech.clone(),
            has_video: !record.youtube_url.is_empty(),
            has_cover,
        });
    }

    values.insert("modals", modals.join("\n"));

    let projects_block = template::render(&templates.projects, &values);
    collect_unresolved(&mut unresolved, "projects", &projects_block);
    values.insert("projects", projects_block.output);

    let page = template::render(&templates.main, &values);
    collect_unresolved(&mut unresolved, "index", &page);

    AssembledPage {
        html: page.output,
        projects: summaries,
        unresolved,
    }
}

/// Parse every configured project file, in ascending id order.
pub fn load_projects(
    config: &SiteConfig,
    root: &Path,
) -> Result<Vec<(u32, ProjectRecord)>, BuildError> {
    config
        .project_ids()
        .map(|id| -> Result<(u32, ProjectRecord), BuildError> {
            let record = project::parse_project_file(&config.project_file(root, id))?;
            Ok((id, record))
        })
        .collect()
}

/// Permissions for a freshly written page: those of the page it replaces,
/// or world-readable when there is none. Temp files start out owner-only.
fn page_permissions(path: &Path) -> std::io::Result<Option<fs::Permissions>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(default_page_permissions()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn default_page_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_page_permissions() -> Option<fs::Permissions> {
    None
}

/// Write `html` to `path` all-or-nothing.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over `path`, so readers see either the old page or the new one.
pub fn write_page(path: &Path, html: &str) -> Result<(), BuildError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(html.as_bytes())?;
    tmp.flush()?;
    if let Some(perms) = page_permissions(path)? {
        tmp.as_file().set_permissions(perms)?;
    }
    tmp.persist(path).map_err(|e| BuildError::Io(e.error))?;
    Ok(())
}

/// Run the build for a site root: copy images, assemble, write the page.
pub fn build(
    config: &SiteConfig,
    root: &Path,
    options: BuildOptions,
) -> Result<BuildReport, BuildError> {
    let assets = assets::copy_project_images(
        &root.join(&config.projects.dir),
        &root.join(&config.output.assets_dir),
        &config.projects.image_extensions,
    )?;

    let templates = Templates::load(config, root)?;
    let projects = load_projects(config, root)?;
    let locator = ImageLocator::from_config(config, root);
    let page = assemble(&templates, &projects, &locator, config, options);

    for missing in &page.unresolved {
        log::warn!(
            "unresolved token {{{{ {} }}}} left in {} template",
            missing.token,
            missing.template
        );
    }

    let output = root.join(&config.output.page);
    write_page(&output, &page.html)?;
    log::info!("wrote {} ({} bytes)", output.display(), page.html.len());

    Ok(BuildReport {
        assets,
        page,
        output,
    })
}

/// Result of validating a site root without writing anything.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// Required inputs that do not exist.
    pub missing: Vec<PathBuf>,
    /// Projects as they would be rendered; empty when inputs are missing.
    pub projects: Vec<ProjectSummary>,
    pub unresolved: Vec<UnresolvedToken>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unresolved.is_empty()
    }
}

/// Check every input exists and assemble the page in memory.
pub fn check(config: &SiteConfig, root: &Path) -> Result<CheckReport, BuildError> {
    let missing: Vec<PathBuf> = config
        .required_inputs(root)
        .into_iter()
        .filter(|p| !p.is_file())
        .collect();
    if !missing.is_empty() {
        return Ok(CheckReport {
            missing,
            ..Default::default()
        });
    }

    let templates = Templates::load(config, root)?;
    let projects = load_projects(config, root)?;
    let locator = ImageLocator::from_config(config, root);
    let page = assemble(&templates, &projects, &locator, config, BuildOptions::default());
    Ok(CheckReport {
        missing,
        projects: page.projects,
        unresolved: page.unresolved,
    })
}

//! Publishing the built page into a website repository.
//!
//! The website lives in a separate git repository. Publishing copies the page,
//! the project images, and the résumé into it, then stages everything and
//! commits with a timestamped message:
//!
//! ```text
//! index.html             → <target>/index.html
//! public/projects/       → <target>/projects/     (replaced wholesale)
//! cv.pdf                 → <target>/cv.pdf        (if present)
//! git add -A && git commit -m "Update website - 2026-10-19 14:03:07"
//! ```
//!
//! Pushing is a separate, opt-in step (`publish.push`). With the default
//! config the commit stays local until pushed by hand.
//!
//! Git is reached through the [`VersionControl`] trait so the copy logic can be
//! tested without a repository; [`GitCli`] shells out to `git`.

use crate::config::PublishConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Publish source not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Publish target directory not found: {0}")]
    TargetNotFound(PathBuf),
    #[error("`{command}` failed: {stderr}")]
    Git { command: String, stderr: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Operations publishing needs from version control.
pub trait VersionControl {
    /// Stage every change in `repo`.
    fn stage_all(&self, repo: &Path) -> Result<(), PublishError>;
    /// Commit staged changes in `repo`.
    fn commit(&self, repo: &Path, message: &str) -> Result<(), PublishError>;
    /// Push `repo` to its upstream.
    fn push(&self, repo: &Path) -> Result<(), PublishError>;
}

/// [`VersionControl`] backed by the `git` executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    fn run(&self, repo: &Path, args: &[&str]) -> Result<(), PublishError> {
        let command = format!("git {}", args.join(" "));
        log::debug!("running `{command}` in {}", repo.display());
        let output = Command::new("git")
            .args(args)
            .current_dir(repo)
            .output()
            .map_err(|e| PublishError::Git {
                command: command.clone(),
                stderr: e.to_string(),
            })?;
        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stderr = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            Err(PublishError::Git { command, stderr })
        }
    }
}

impl VersionControl for GitCli {
    fn stage_all(&self, repo: &Path) -> Result<(), PublishError> {
        self.run(repo, &["add", "-A"])
    }

    fn commit(&self, repo: &Path, message: &str) -> Result<(), PublishError> {
        self.run(repo, &["commit", "-m", message])
    }

    fn push(&self, repo: &Path) -> Result<(), PublishError> {
        self.run(repo, &["push"])
    }
}

/// What to publish and where.
#[derive(Debug, Clone)]
pub struct PublishRequest<'a> {
    /// Built page.
    pub page: &'a Path,
    /// Directory of copied project images.
    pub assets_dir: &'a Path,
    /// Résumé document; skipped when it does not exist.
    pub resume: Option<&'a Path>,
    /// Website repository.
    pub target: &'a Path,
}

/// Outcome of a publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// Paths written inside the target, relative to it.
    pub copied: Vec<PathBuf>,
    pub commit_message: String,
    pub pushed: bool,
}

/// Commit message for a publish at the current local time.
pub fn commit_message(prefix: &str) -> String {
    format!(
        "{prefix} - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

/// Copy `src` into `dst`, replacing whatever `dst` held.
fn replace_dir(src: &Path, dst: &Path) -> Result<usize, PublishError> {
    if dst.exists() {
        fs::remove_dir_all(dst)?;
    }
    fs::create_dir_all(dst)?;
    let mut files = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let to = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&to)?;
        } else {
            fs::copy(entry.path(), &to)?;
            files += 1;
        }
    }
    Ok(files)
}

fn file_name(path: &Path) -> PathBuf {
    path.file_name().map(PathBuf::from).unwrap_or_default()
}

/// Copy the build into the target repository and commit it.
///
/// Both the page and the target are checked before anything is copied. Git
/// steps run in order and the first failure stops the run.
pub fn publish(
    request: &PublishRequest<'_>,
    config: &PublishConfig,
    vcs: &dyn VersionControl,
) -> Result<PublishReport, PublishError> {
    if !request.page.is_file() {
        return Err(PublishError::SourceNotFound(request.page.to_path_buf()));
    }
    if !request.target.is_dir() {
        return Err(PublishError::TargetNotFound(request.target.to_path_buf()));
    }

    let mut copied = Vec::new();

    let page_name = file_name(request.page);
    fs::copy(request.page, request.target.join(&page_name))?;
    copied.push(page_name);

    if request.assets_dir.is_dir() {
        let assets_name = file_name(request.assets_dir);
        let files = replace_dir(request.assets_dir, &request.target.join(&assets_name))?;
        log::debug!("copied {files} asset files");
        copied.push(assets_name);
    } else {
        log::warn!(
            "assets directory {} missing, not published",
            request.assets_dir.display()
        );
    }

    if let Some(resume) = request.resume.filter(|p| p.is_file()) {
        let resume_name = file_name(resume);
        fs::copy(resume, request.target.join(&resume_name))?;
        copied.push(resume_name);
    }

    let message = commit_message(&config.commit_prefix);
    vcs.stage_all(request.target)?;
    vcs.commit(request.target, &message)?;
    log::info!("committed in {}: {message}", request.target.display());

    if config.push {
        vcs.push(request.target)?;
    }

    Ok(PublishReport {
        copied,
        commit_message: message,
        pushed: config.push,
    })
}

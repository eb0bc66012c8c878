//! Project description files.
//!
//! Each project on the page is described by one markdown file, `projects/N.md`,
//! with a small line-oriented header in front of free markdown:
//!
//! ```text
//! gh:https://github.com/me/thing       # line 1, always the repository link
//! tech:Rust, SQLite                     # optional, only right after line 1
//! yt:https://youtu.be/abc               # optional, any number (last wins)
//! # Thing                               # title: first single-# heading
//!
//! Thing does stuff.                     # description: first plain line
//!
//! ## How it works                       # modal sections
//! ...
//! ```
//!
//! Everything after the title line is kept verbatim as the modal markdown.
//! Missing optional lines leave the corresponding field empty; only a missing
//! file is an error.
//!
//! Header values and section headings are plain text, not HTML. They are
//! escaped when placed on the page, so `&mdash;` shows up literally; write
//! the character itself instead.

use crate::markdown;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Project file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read project file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Structured content of one project file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectRecord {
    /// Repository link, `gh:` prefix stripped.
    pub github_url: String,
    /// Video link from a `yt:` line; empty if absent.
    pub youtube_url: String,
    /// Comma-separated technologies from a `tech:` line; empty if absent.
    pub tech: String,
    /// Text of the first `# ` heading; empty if there is none.
    pub title: String,
    /// First non-blank, non-heading line after the title.
    pub description: String,
    /// Every line after the title line, verbatim. Empty when no title exists.
    pub modal_markdown: String,
}

impl ProjectRecord {
    /// The whole modal markdown converted in one piece, without sectioning.
    pub fn modal_html(&self) -> String {
        markdown::to_html(&self.modal_markdown)
    }
}

/// Read and parse a project file.
pub fn parse_project_file(path: &Path) -> Result<ProjectRecord, ProjectError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ProjectError::NotFound(path.to_path_buf())
        } else {
            ProjectError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    Ok(parse_project(&content))
}

/// Parse the contents of a project file.
pub fn parse_project(content: &str) -> ProjectRecord {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut record = ProjectRecord::default();

    let Some(first) = lines.first() else {
        return record;
    };
    let first = first.trim();
    record.github_url = first.strip_prefix("gh:").unwrap_or(first).trim().to_string();

    let mut i = 1;
    if let Some(tech) = lines.get(i).and_then(|l| l.trim().strip_prefix("tech:")) {
        record.tech = tech.trim().to_string();
        i += 1;
    }

    let mut title_line = None;
    while i < lines.len() {
        let line = lines[i].trim();
        i += 1;
        if let Some(yt) = line.strip_prefix("yt:") {
            record.youtube_url = yt.trim().to_string();
        } else if is_title(line) {
            record.title = line.trim_start_matches('#').trim().to_string();
            title_line = Some(i - 1);
            break;
        }
    }

    if let Some(desc) = lines[i.min(lines.len())..]
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty() && !l.starts_with('#'))
    {
        record.description = desc.to_string();
    }

    if let Some(idx) = title_line {
        record.modal_markdown = lines[idx + 1..].join("\n");
    }

    record
}

fn is_title(line: &str) -> bool {
    line.starts_with('#') && !line.starts_with("##")
}

//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines (pure, testable) and
//! a `print_*` wrapper writing them to stdout. Projects are listed by id and
//! title with details indented underneath:
//!
//! ```text
//! Assets
//!     3 images → public/projects
//!
//! Projects
//! 001 Pathfinder
//!     Tech: Rust, WebGPU
//!     Cover: yes  Video: no
//! 002 (untitled)
//!     Cover: no  Video: no
//!
//! Successfully generated index.html
//! ```

use crate::page::{BuildReport, CheckReport, ProjectSummary, UnresolvedToken};
use crate::publish::PublishReport;
use std::path::Path;

/// Format a 1-based index as 3-digit zero-padded.
fn format_index(pos: u32) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn project_lines(projects: &[ProjectSummary]) -> Vec<String> {
    let mut lines = vec!["Projects".to_string()];
    for p in projects {
        let title = if p.title.is_empty() {
            "(untitled)"
        } else {
            p.title.as_str()
        };
        lines.push(format!("{} {}", format_index(p.id), title));
        if !p.tech.is_empty() {
            lines.push(format!("{}Tech: {}", indent(1), p.tech));
        }
        lines.push(format!(
            "{}Cover: {}  Video: {}",
            indent(1),
            yes_no(p.has_cover),
            yes_no(p.has_video)
        ));
    }
    lines
}

fn unresolved_lines(tokens: &[UnresolvedToken]) -> Vec<String> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Unresolved placeholders".to_string()];
    for t in tokens {
        lines.push(format!("{}{{{{ {} }}}} in {}", indent(1), t.token, t.template));
    }
    lines
}

/// Display a path relative to the site root when possible.
fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Format the result of a build.
pub fn format_build_output(report: &BuildReport, root: &Path, assets_dir: &Path) -> Vec<String> {
    let mut lines = vec![
        "Assets".to_string(),
        format!(
            "{}{} images \u{2192} {}",
            indent(1),
            report.assets.count(),
            assets_dir.display()
        ),
        String::new(),
    ];
    lines.extend(project_lines(&report.page.projects));
    lines.extend(unresolved_lines(&report.page.unresolved));
    lines.push(String::new());
    lines.push(format!(
        "Successfully generated {}",
        relative(&report.output, root)
    ));
    lines
}

pub fn print_build_output(report: &BuildReport, root: &Path, assets_dir: &Path) {
    for line in format_build_output(report, root, assets_dir) {
        println!("{}", line);
    }
}

/// Format the result of `check`.
pub fn format_check_output(report: &CheckReport, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    if !report.missing.is_empty() {
        lines.push("Missing inputs".to_string());
        for path in &report.missing {
            lines.push(format!("{}{}", indent(1), relative(path, root)));
        }
        return lines;
    }
    lines.extend(project_lines(&report.projects));
    lines.extend(unresolved_lines(&report.unresolved));
    lines
}

pub fn print_check_output(report: &CheckReport, root: &Path) {
    for line in format_check_output(report, root) {
        println!("{}", line);
    }
}

/// Format the result of a publish run.
pub fn format_publish_output(report: &PublishReport, target: &Path) -> Vec<String> {
    let mut lines = vec![format!("Published \u{2192} {}", target.display())];
    for path in &report.copied {
        lines.push(format!("{}{}", indent(1), path.display()));
    }
    lines.push(format!("Committed: {}", report.commit_message));
    if !report.pushed {
        lines.push("Push disabled; commit is local only".to_string());
    }
    lines
}

pub fn print_publish_output(report: &PublishReport, target: &Path) {
    for line in format_publish_output(report, target) {
        println!("{}", line);
    }
}

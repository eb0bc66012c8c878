//! Project modal rendering.
//!
//! A modal is the expandable detail panel of one project. Its body is built
//! from the project's modal markdown, one `div.modal-section` per `##` section:
//!
//! ```text
//! <div class="modal-section">
//!   <img src="projects/2-1.png" alt="Heading" class="modal-section-image-left">
//!   <h2>Heading</h2>
//!   ...converted markdown...
//! </div>
//! ```
//!
//! ## Image slots
//!
//! Section images are looked up as `{project}-{slot}.{ext}` with a slot counter
//! that starts at 1 and only moves forward when a lookup succeeds. A section
//! without an image leaves the counter where it was, so the next section gets
//! a shot at the same slot. With images `1-1` and `1-2` and three sections of
//! which the first has no image:
//!
//! ```text
//! section 0  tries slot 1 → hit   → counter 2
//! section 1  tries slot 2 → hit   → counter 3
//! section 2  tries slot 3 → miss  → counter 3
//! ```
//!
//! ## Placement
//!
//! Left/right placement follows the section's position in the split sequence,
//! not the slot: even positions get `modal-section-image-left`, odd positions
//! `modal-section-image-right`.

use crate::images::ImageLocator;
use crate::markdown;
use crate::project::ProjectRecord;
use crate::sections::split_sections;
use crate::template::{self, Rendered, Values, escape};
use maud::{Markup, PreEscaped, html};

/// Which side of the text a section image floats on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Left,
    Right,
}

impl Placement {
    pub fn for_position(position: usize) -> Self {
        if position % 2 == 0 {
            Placement::Left
        } else {
            Placement::Right
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Placement::Left => "modal-section-image-left",
            Placement::Right => "modal-section-image-right",
        }
    }
}

/// Remove the first line of the form `# text` and trim what is left.
///
/// The modal header already shows the title, so an H1 at the top of the
/// intro would repeat it. Lines indented or without the space after `#` are
/// kept.
pub fn strip_title_heading(intro: &str) -> String {
    let mut removed = false;
    let kept: Vec<&str> = intro
        .split('\n')
        .filter(|line| {
            let is_h1 = line
                .strip_prefix("# ")
                .is_some_and(|rest| !rest.trim_end_matches('\r').is_empty());
            if !removed && is_h1 {
                removed = true;
                false
            } else {
                true
            }
        })
        .collect();
    kept.join("\n").trim().to_string()
}

fn render_section(heading: &str, image: Option<(&str, Placement)>, body_markdown: &str) -> Markup {
    let body_html = if body_markdown.trim().is_empty() {
        String::new()
    } else {
        markdown::to_html(body_markdown)
    };
    html! {
        div.modal-section {
            @if let Some((src, placement)) = image {
                img src=(src) alt=(heading) class=(placement.css_class());
            }
            @if !heading.is_empty() {
                h2 { (heading) }
            }
            (PreEscaped(body_html))
        }
    }
}

/// Render the modal body for `project` from its modal markdown.
pub fn render_modal_body(project: u32, markdown: &str, locator: &ImageLocator) -> String {
    let sections = split_sections(markdown);
    let mut slot = 1;
    let mut parts = Vec::with_capacity(sections.len());

    for (position, section) in sections.iter().enumerate() {
        let body = if position == 0 && section.is_intro() {
            strip_title_heading(&section.body_markdown)
        } else {
            section.body_markdown.clone()
        };

        if section.is_intro() && body.trim().is_empty() {
            continue;
        }

        let found = locator.locate(project, slot);
        if found.is_some() {
            slot += 1;
        }
        let placement = Placement::for_position(position);
        let image = found.as_ref().map(|f| (f.src.as_str(), placement));

        parts.push(render_section(&section.heading, image, &body).into_string());
    }

    parts.join("\n")
}

/// Fill the modal template for one project.
pub fn render_modal(
    modal_template: &str,
    project: u32,
    record: &ProjectRecord,
    locator: &ImageLocator,
) -> Rendered {
    let mut values = Values::new();
    values
        .insert("modal_id", modal_id(project))
        .insert("project_title", escape(&record.title))
        .insert("project_tech", escape(&record.tech))
        .insert(
            "modal_body",
            render_modal_body(project, &record.modal_markdown, locator),
        );
    template::render(modal_template, &values)
}

/// DOM id of a project's modal; project cards reference it to open it.
pub fn modal_id(project: u32) -> String {
    format!("modal-{project}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn locator(dir: &Path) -> ImageLocator {
        ImageLocator::new(
            dir,
            vec!["png".to_string(), "jpg".to_string()],
            "projects",
        )
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn placement_alternates_from_left() {
        assert_eq!(Placement::for_position(0), Placement::Left);
        assert_eq!(Placement::for_position(1), Placement::Right);
        assert_eq!(Placement::for_position(2), Placement::Left);
    }

    #[test]
    fn strip_title_removes_first_h1_only() {
        assert_eq!(strip_title_heading("# T\nbody\n# Again"), "body\n# Again");
    }

    #[test]
    fn strip_title_keeps_h2_and_no_space_variants() {
        assert_eq!(strip_title_heading("## Sub\nbody"), "## Sub\nbody");
        assert_eq!(strip_title_heading("#NoSpace\nbody"), "#NoSpace\nbody");
        assert_eq!(strip_title_heading("  # Indented\nbody"), "# Indented\nbody");
    }

    #[test]
    fn strip_title_after_leading_blank_lines() {
        // The H1 need not be the first line: the first matching line anywhere
        // in the intro is removed.
        assert_eq!(strip_title_heading("\n\n# T\nbody"), "body");
        assert_eq!(strip_title_heading("text first\n# T\nbody"), "text first\nbody");
    }

    #[test]
    fn strip_title_bare_hash_kept() {
        assert_eq!(strip_title_heading("# \nbody"), "# \nbody");
    }

    #[test]
    fn two_sections_in_order_left_then_right() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "1-1.png");
        touch(tmp.path(), "1-2.jpg");
        let html = render_modal_body(1, "## First\nAlpha\n## Second\nBeta\n", &locator(tmp.path()));

        let first = html.find("<h2>First</h2>").unwrap();
        let second = html.find("<h2>Second</h2>").unwrap();
        assert!(first < second);

        let left = html.find("modal-section-image-left").unwrap();
        let right = html.find("modal-section-image-right").unwrap();
        assert!(left < first && first < right && right < second);
        assert!(html.contains(r#"src="projects/1-1.png""#));
        assert!(html.contains(r#"src="projects/1-2.jpg""#));
    }

    #[test]
    fn missing_image_does_not_advance_slot() {
        let tmp = TempDir::new().unwrap();
        // Only slot 1 exists. Intro at position 0 takes it; both later
        // sections try slot 2 and miss.
        touch(tmp.path(), "4-1.png");
        let html = render_modal_body(4, "Intro\n## A\na\n## B\nb\n", &locator(tmp.path()));
        assert_eq!(count(&html, "<img"), 1);
        assert_eq!(count(&html, "modal-section\""), 3);
    }

    #[test]
    fn miss_then_hit_uses_same_slot() {
        let tmp = TempDir::new().unwrap();
        let loc = locator(tmp.path());
        // Slot 1 is missing, so every section asks for slot 1 and slot 2 is
        // never reached.
        touch(tmp.path(), "2-2.png");
        let html = render_modal_body(2, "## A\na\n## B\nb\n", &loc);
        assert_eq!(count(&html, "<img"), 0);

        touch(tmp.path(), "2-1.png");
        let html = render_modal_body(2, "## A\na\n## B\nb\n## C\nc\n", &loc);
        assert!(html.contains("2-1.png"));
        assert!(html.contains("2-2.png"));
        assert_eq!(count(&html, "<img"), 2);
    }

    #[test]
    fn placement_uses_position_not_slot() {
        let tmp = TempDir::new().unwrap();
        // Only one image: it lands on whichever section first asks for slot 1.
        touch(tmp.path(), "3-1.png");
        let html = render_modal_body(3, "Intro\n## A\na\n", &locator(tmp.path()));
        assert!(html.contains("modal-section-image-left"));

        // With an intro that is only the title, position 0 is skipped; the
        // image goes to position 1 and floats right.
        let html = render_modal_body(3, "# Title\n## A\na\n", &locator(tmp.path()));
        assert!(html.contains("modal-section-image-right"));
        assert!(!html.contains("modal-section-image-left"));
    }

    #[test]
    fn title_only_intro_skipped() {
        let tmp = TempDir::new().unwrap();
        let html = render_modal_body(1, "# Title\n\n## A\nbody", &locator(tmp.path()));
        assert_eq!(count(&html, "modal-section\""), 1);
        assert!(!html.contains("<h1>"));
    }

    #[test]
    fn heading_without_body_still_rendered() {
        let tmp = TempDir::new().unwrap();
        let html = render_modal_body(1, "## Empty\n## Full\ntext", &locator(tmp.path()));
        assert_eq!(
            html.lines().next().unwrap(),
            r#"<div class="modal-section"><h2>Empty</h2></div>"#
        );
    }

    #[test]
    fn no_image_means_no_img_tag() {
        let tmp = TempDir::new().unwrap();
        let html = render_modal_body(1, "Intro\n## A\nbody", &locator(tmp.path()));
        assert!(!html.contains("<img"));
        assert!(html.contains("<p>Intro</p>"));
    }

    #[test]
    fn empty_markdown_renders_nothing() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(render_modal_body(1, "", &locator(tmp.path())), "");
    }

    #[test]
    fn section_image_alt_is_heading() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "1-1.png");
        let html = render_modal_body(1, "## Setup & Run\nx", &locator(tmp.path()));
        assert!(html.contains(r#"alt="Setup &amp; Run""#));
        assert!(html.contains("<h2>Setup &amp; Run</h2>"));
    }

    #[test]
    fn modal_template_filled() {
        let tmp = TempDir::new().unwrap();
        let record = ProjectRecord {
            title: "Thing".to_string(),
            tech: "Rust, SQL".to_string(),
            modal_markdown: "Intro text".to_string(),
            ..Default::default()
        };
        let template = r#"<div id="{{ modal_id }}"><h1>{{ project_title }}</h1><span>{{ project_tech }}</span>{{ modal_body }}</div>"#;
        let rendered = render_modal(template, 3, &record, &locator(tmp.path()));
        assert!(rendered.unresolved.is_empty());
        assert_eq!(
            rendered.output,
            r#"<div id="modal-3"><h1>Thing</h1><span>Rust, SQL</span><div class="modal-section"><p>Intro text</p>
</div></div>"#
        );
    }
}

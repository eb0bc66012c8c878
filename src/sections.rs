//! Splitting modal markdown into `##` sections.

/// One `## heading` block of a project's modal markdown.
///
/// The intro (text before the first heading) has an empty `heading` and is
/// always at position zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub body_markdown: String,
}

impl Section {
    pub fn is_intro(&self) -> bool {
        self.heading.is_empty()
    }
}

/// Heading text if `line` is a second-level heading (`## text`).
///
/// Only exactly two hashes followed by a space and at least one character
/// count; `### x` and `##x` do not.
fn h2_heading(line: &str) -> Option<&str> {
    line.strip_prefix("## ").filter(|rest| !rest.is_empty())
}

/// Split markdown into sections at second-level headings.
///
/// Bodies and headings are trimmed. A blank intro is dropped; a heading
/// followed by nothing still yields a section with an empty body.
pub fn split_sections(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut heading: Option<&str> = None;
    let mut body: Vec<&str> = Vec::new();

    for line in markdown.lines() {
        if let Some(next) = h2_heading(line) {
            push_section(&mut sections, heading, &body);
            heading = Some(next);
            body.clear();
        } else {
            body.push(line);
        }
    }
    push_section(&mut sections, heading, &body);

    sections
}

fn push_section(sections: &mut Vec<Section>, heading: Option<&str>, body: &[&str]) {
    let body_markdown = body.join("\n").trim().to_string();
    match heading {
        None if body_markdown.is_empty() => {}
        None => sections.push(Section {
            heading: String::new(),
            body_markdown,
        }),
        Some(h) => sections.push(Section {
            heading: h.trim().to_string(),
            body_markdown,
        }),
    }
}

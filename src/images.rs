//! Project image lookup.
//!
//! Images sit next to the project files and follow `{project}-{slot}.{ext}`:
//! `2-1.png` is slot 1 of project 2. Slot 1 doubles as the card cover image.
//! Extensions are tried in configured order and the first existing file wins,
//! so with both `2-1.png` and `2-1.jpg` present the PNG is used.

use crate::config::SiteConfig;
use maud::{Markup, html};
use std::path::{Path, PathBuf};

/// Slot used for the cover image on a project card.
pub const COVER_SLOT: u32 = 1;

/// A located image: where it is on disk and how the page refers to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundImage {
    pub path: PathBuf,
    pub src: String,
}

/// Probes a directory for `{project}-{slot}.{ext}` files.
#[derive(Debug, Clone)]
pub struct ImageLocator {
    dir: PathBuf,
    extensions: Vec<String>,
    base_url: String,
}

impl ImageLocator {
    pub fn new(dir: impl Into<PathBuf>, extensions: Vec<String>, base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extensions,
            base_url: base_url.into(),
        }
    }

    /// Locator for the project directory of a site root.
    pub fn from_config(config: &SiteConfig, root: &Path) -> Self {
        Self::new(
            root.join(&config.projects.dir),
            config.projects.image_extensions.clone(),
            config.output.image_base_url.clone(),
        )
    }

    /// First existing image for `project`/`slot`, by extension order.
    pub fn locate(&self, project: u32, slot: u32) -> Option<FoundImage> {
        let found = self.extensions.iter().find_map(|ext| {
            let name = format!("{project}-{slot}.{ext}");
            let path = self.dir.join(&name);
            path.is_file().then(|| FoundImage {
                src: self.src_for(&name),
                path,
            })
        });
        log::debug!(
            "image probe {project}-{slot}: {}",
            found.as_ref().map_or("none".to_string(), |f| f.src.clone())
        );
        found
    }

    fn src_for(&self, file_name: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.is_empty() {
            file_name.to_string()
        } else {
            format!("{base}/{file_name}")
        }
    }
}

/// Cover image for a project card, or empty markup when there is none.
pub fn render_cover_image(locator: &ImageLocator, project: u32, title: &str) -> Markup {
    html! {
        @if let Some(image) = locator.locate(project, COVER_SLOT) {
            img src=(image.src) alt=(title) class="project-image";
        }
    }
}

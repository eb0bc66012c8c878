//! # Folio
//!
//! A tiny static site generator for a single-page developer portfolio. A
//! handful of HTML/CSS/JS templates and one markdown file per project go in;
//! one self-contained `index.html` comes out, optionally committed into a
//! separate website repository.
//!
//! # Pipeline
//!
//! ```text
//! 1. Assets    projects/*.{png,jpg,..}  →  public/projects/
//! 2. Assemble  templates/ + projects/N.md + presentation.md  →  index.html
//! 3. Publish   index.html + public/projects/ + cv.pdf  →  <website repo>, git commit
//! ```
//!
//! Everything runs sequentially on one thread. Any I/O or git failure stops
//! the run; the page itself is written atomically, so a failed run leaves the
//! previous page in place.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `folio.toml` loading, stock defaults, validation |
//! | [`project`] | Project file parser (`gh:`, `tech:`, `yt:`, `# title`, description) |
//! | [`sections`] | Splits modal markdown at `## ` headings |
//! | [`images`] | `{project}-{slot}.{ext}` image lookup and cover image markup |
//! | [`modal`] | Modal body rendering with alternating section images |
//! | [`template`] | Single-pass `{{ token }}` substitution over a token map |
//! | [`markdown`] | Markdown to HTML via `pulldown-cmark` |
//! | [`page`] | Page assembly, `check`, atomic output write |
//! | [`assets`] | Copies project images into the public assets directory |
//! | [`publish`] | Copies the build into the website repository and commits |
//! | [`output`] | CLI output formatting |
//!
//! # Site Layout
//!
//! ```text
//! site/
//! ├── folio.toml               # Optional, see config module
//! ├── presentation.md          # Hero text
//! ├── cv.pdf                   # Optional résumé
//! ├── templates/
//! │   ├── index.html           # {{ css }} {{ hero }} {{ projects }} {{ modals }} {{ javascript }}
//! │   ├── hero.html            # {{ presentation }} {{ resume_button }}
//! │   ├── projects.html        # {{ project_N_title }} ... for N in 1..=count
//! │   ├── modal.html           # {{ modal_id }} {{ project_title }} {{ project_tech }} {{ modal_body }}
//! │   ├── css/{base,hero,projects,modal}.css
//! │   └── js/main.js
//! └── projects/
//!     ├── 1.md .. 4.md
//!     └── 1-1.png, 1-2.jpg ...  # N-slot images; slot 1 is also the card cover
//! ```

pub mod assets;
pub mod config;
pub mod images;
pub mod markdown;
pub mod modal;
pub mod output;
pub mod page;
pub mod project;
pub mod publish;
pub mod sections;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;

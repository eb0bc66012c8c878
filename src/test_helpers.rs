//! Shared test utilities.
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let site = setup_site();
//! touch(&site.path().join("projects"), "1-1.png");
//! build(&SiteConfig::default(), site.path(), BuildOptions::default()).unwrap();
//! assert_no_tokens(&read_output(&site, "index.html"));
//! ```

use std::path::Path;
use tempfile::TempDir;

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Create an empty file; image lookups only care that it exists.
pub fn touch(dir: &Path, name: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), b"").unwrap();
}

/// Read a file relative to the site root. Panics if missing.
pub fn read_output(site: &TempDir, rel: &str) -> String {
    let path = site.path().join(rel);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// Assert no per-project placeholder survived assembly.
pub fn assert_no_tokens(html: &str) {
    for id in 1..=4 {
        for field in ["github", "title", "description", "youtube_link", "image"] {
            let token = format!("{{{{ project_{id}_{field} }}}}");
            assert!(!html.contains(&token), "leftover token {token}");
        }
    }
    for token in ["css", "javascript", "hero", "projects", "modals", "modal_body"] {
        let token = format!("{{{{ {token} }}}}");
        assert!(!html.contains(&token), "leftover token {token}");
    }
}

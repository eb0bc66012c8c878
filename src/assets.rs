//! Copying project images into the public assets directory.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Projects directory not found: {0}")]
    MissingSource(PathBuf),
    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Files copied by one [`copy_project_images`] run, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: Vec<String>,
}

impl CopyReport {
    pub fn count(&self) -> usize {
        self.copied.len()
    }
}

fn has_image_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&ext)))
}

/// Copy every image file directly inside `source` into `dest`.
///
/// `dest` is created if needed and same-named files in it are overwritten.
/// Subdirectories and non-image files are ignored. Copying nothing is fine.
pub fn copy_project_images(
    source: &Path,
    dest: &Path,
    extensions: &[String],
) -> Result<CopyReport, AssetError> {
    if !source.is_dir() {
        return Err(AssetError::MissingSource(source.to_path_buf()));
    }

    let mut images: Vec<PathBuf> = fs::read_dir(source)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    images.retain(|p| p.is_file() && has_image_extension(p, extensions));
    images.sort();

    fs::create_dir_all(dest)?;

    let mut report = CopyReport::default();
    for from in images {
        let Some(name) = from.file_name() else {
            continue;
        };
        let to = dest.join(name);
        fs::copy(&from, &to).map_err(|source| AssetError::Copy {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;
        log::debug!("copied {} -> {}", from.display(), to.display());
        report.copied.push(name.to_string_lossy().to_string());
    }
    Ok(report)
}

//! Source directory scanning.
//!
//! Produces the ordered set of [`ImageEntry`] values the gallery is built
//! from. The listing is flat — the gallery is a single directory, not a
//! tree — and recomputed from the live filesystem on every run.
//!
//! ## Selection rules
//!
//! - Regular files only; subdirectories (including the thumbnail directory
//!   when nested under the source directory) are ignored.
//! - A file is an image when its lowercased name ends with `.{ext}` for a
//!   recognized extension. This is a suffix match on the whole name, so
//!   `PHOTO.JPG` and `archive.v2.png` qualify while `notes.txt` does not.
//! - Entries are sorted ascending by filename in plain byte order. No
//!   locale collation: `C.gif` sorts before `a.jpg`.

use crate::config::GalleryConfig;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("source directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One source image, derived from the directory listing.
///
/// `thumb_path` is where the thumbnail belongs — the file may not exist
/// yet; the gallery stage creates it on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub filename: String,
    pub source_path: PathBuf,
    pub thumb_path: PathBuf,
}

/// List the source directory and return recognized images, sorted by
/// filename. An empty-but-existing directory yields an empty list, not an
/// error.
pub fn list_images(config: &GalleryConfig) -> Result<Vec<ImageEntry>, ScanError> {
    if !config.source_dir.is_dir() {
        return Err(ScanError::DirectoryNotFound(config.source_dir.clone()));
    }

    let mut entries: Vec<ImageEntry> = fs::read_dir(&config.source_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            if !has_image_extension(&name, &config.extensions) {
                return None;
            }
            Some(ImageEntry {
                thumb_path: config.thumb_dir.join(&name),
                source_path: path,
                filename: name,
            })
        })
        .collect();

    entries.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(entries)
}

fn has_image_extension(name: &str, extensions: &[String]) -> bool {
    let lower = name.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

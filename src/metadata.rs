//! Caption resolution.
//!
//! Each image gets its caption from one of two sources:
//!
//! - **Sidecar file**: a `.txt` file with the same stem beside the source
//!   image (`dunes.jpg` → `dunes.txt`). The file's content, trimmed of
//!   leading and trailing whitespace, is the caption. Precedence is
//!   absolute: an existing sidecar wins even when its trimmed content is
//!   empty — creating an empty sidecar is how you blank a caption.
//! - **Modification date**: when no sidecar exists, the source file's
//!   last-modified time formatted `YYYY.MM.DD` in the local time zone.
//!
//! Resolution is deterministic given the directory's current contents; the
//! caption is never persisted, only embedded in the generated HTML.

use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sidecar path for an image: same stem, `.txt` extension.
pub fn sidecar_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("txt")
}

/// Read an image's sidecar caption.
///
/// Returns `None` when no sidecar exists, `Some(trimmed content)` when one
/// does — including `Some("")` for a whitespace-only file. Read failures on
/// an existing sidecar propagate.
pub fn read_sidecar(image_path: &Path) -> io::Result<Option<String>> {
    let sidecar = sidecar_path(image_path);
    if !sidecar.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&sidecar)?;
    Ok(Some(content.trim().to_string()))
}

/// The file's last-modified time formatted `YYYY.MM.DD`, local time.
pub fn modified_date(path: &Path) -> io::Result<String> {
    let mtime = fs::metadata(path)?.modified()?;
    let local: DateTime<Local> = mtime.into();
    Ok(local.format("%Y.%m.%d").to_string())
}

/// Resolve an image's caption: sidecar first, modification date otherwise.
pub fn resolve_caption(image_path: &Path) -> io::Result<String> {
    match read_sidecar(image_path)? {
        Some(caption) => Ok(caption),
        None => modified_date(image_path),
    }
}

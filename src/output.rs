//! CLI output formatting.
//!
//! Each reporting concern has a pure `format_*` function (testable, no
//! I/O) and the binary prints the returned lines. Build progress arrives
//! as [`BuildEvent`] values drained from the event channel; the patch
//! stage and the `check` command format their results directly.
//!
//! ```text
//! Thumbnail created: 2024-dunes.jpg
//! Thumbnail failed for broken.jpg: Processing failed: ...
//! 12 images processed.
//! index.html updated.
//! ```

use crate::gallery::{BuildEvent, EntryStatus};
use crate::patch::PatchStatus;
use std::path::Path;

/// Format a single build progress event as one display line.
pub fn format_build_event(event: &BuildEvent) -> String {
    match event {
        BuildEvent::ThumbnailCreated { filename } => {
            format!("Thumbnail created: {filename}")
        }
        BuildEvent::ThumbnailFailed { filename, cause } => {
            format!("Thumbnail failed for {filename}: {cause}")
        }
        BuildEvent::Summary { count } => format!("{count} images processed."),
    }
}

/// Format the patch outcome for the console.
pub fn format_patch_status(status: &PatchStatus, document: &Path) -> String {
    match status {
        PatchStatus::Updated => format!("{} updated.", document.display()),
        PatchStatus::SkippedNoDocument => {
            format!("{} not found, skipping patch.", document.display())
        }
        PatchStatus::SkippedMarkerNotFound => format!(
            "Grid marker not found in {}, document left untouched.",
            document.display()
        ),
    }
}

/// Format the `check` listing: one header per image with indented status.
///
/// ```text
/// 001 2024-dunes.jpg
///     thumbnail: present
///     caption: sidecar
/// 002 harbor.png
///     thumbnail: missing
///     caption: modified date
/// 2 images
/// ```
pub fn format_check_output(entries: &[EntryStatus]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), entry.filename));
        lines.push(format!(
            "    thumbnail: {}",
            if entry.thumbnail_exists {
                "present"
            } else {
                "missing"
            }
        ));
        lines.push(format!(
            "    caption: {}",
            if entry.has_sidecar {
                "sidecar"
            } else {
                "modified date"
            }
        ));
    }
    lines.push(format!("{} images", entries.len()));
    lines
}

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

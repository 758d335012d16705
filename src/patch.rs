//! In-place document patching.
//!
//! Stage 2 of the pipeline. Locates the grid container in the host document
//! and replaces its contents with the freshly built fragment, leaving every
//! byte outside that span untouched. This is literal substring work on the
//! document text — by design not an HTML parser.
//!
//! ## Span finding
//!
//! The end of the replaceable span is found by an ordered list of
//! strategies; the first that succeeds wins:
//!
//! 1. [`find_via_next_marker`]: find the next section's marker after the
//!    grid marker, then take the *last* `</div>` before it. The grid's own
//!    content nests closing tags, so searching forward from the grid
//!    marker would stop at the first item's `</div>`; anchoring on the
//!    following section and walking backward lands on the grid's own
//!    closing tag instead.
//! 2. [`find_first_closing_tag`]: the first `</div>` after the grid
//!    marker. Used when the next-section marker is absent. This one *is*
//!    nesting-blind and can truncate mid-content; the tool assumes the
//!    expected page shape rather than fixing this case.
//!
//! Absence of the document or of a usable span is a reported status, not an
//! error — the gallery fragment file has already been written either way.

use crate::config::GalleryConfig;
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a patch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStatus {
    /// The grid region was replaced and the document rewritten.
    Updated,
    /// The document file does not exist; nothing was done.
    SkippedNoDocument,
    /// The grid marker (or any usable closing tag) was not found; the
    /// document was left byte-identical.
    SkippedMarkerNotFound,
}

const CLOSING_TAG: &str = "</div>";

/// Indentation placed before the grid's closing tag after splicing.
const SPLICE_INDENT: &str = "    ";

/// Patch the host document in place with the given fragment.
pub fn patch(config: &GalleryConfig, fragment: &str) -> Result<PatchStatus, PatchError> {
    if !config.document_file.exists() {
        return Ok(PatchStatus::SkippedNoDocument);
    }
    let content = fs::read_to_string(&config.document_file)?;

    match splice(
        &content,
        fragment,
        &config.grid_marker,
        &config.next_section_marker,
    ) {
        Some(updated) => {
            fs::write(&config.document_file, updated)?;
            Ok(PatchStatus::Updated)
        }
        None => Ok(PatchStatus::SkippedMarkerNotFound),
    }
}

/// Replace the grid span of `content` with `fragment`.
///
/// Returns `None` when the opening marker is missing or no closing tag can
/// be located. The result keeps everything up to and including the opening
/// marker, then a newline, the fragment, a newline plus indentation, and
/// the original text from the located closing tag onward.
pub fn splice(
    content: &str,
    fragment: &str,
    grid_marker: &str,
    next_section_marker: &str,
) -> Option<String> {
    let open_start = content.find(grid_marker)?;
    let open_end = open_start + grid_marker.len();
    let span_end = find_span_end(content, open_start, open_end, next_section_marker)?;

    let mut updated = String::with_capacity(content.len() + fragment.len());
    updated.push_str(&content[..open_end]);
    updated.push('\n');
    updated.push_str(fragment);
    updated.push('\n');
    updated.push_str(SPLICE_INDENT);
    updated.push_str(&content[span_end..]);
    Some(updated)
}

/// Locate the end of the replaceable span: strategies in order, first
/// success wins.
fn find_span_end(
    content: &str,
    open_start: usize,
    open_end: usize,
    next_section_marker: &str,
) -> Option<usize> {
    find_via_next_marker(content, open_start, open_end, next_section_marker)
        .or_else(|| find_first_closing_tag(content, open_end))
}

/// Last closing tag before the next section's marker, bounded below by the
/// opening marker's position.
fn find_via_next_marker(
    content: &str,
    open_start: usize,
    open_end: usize,
    next_section_marker: &str,
) -> Option<usize> {
    let marker_pos = content[open_end..].find(next_section_marker)? + open_end;
    content[open_start..marker_pos]
        .rfind(CLOSING_TAG)
        .map(|pos| pos + open_start)
}

/// First closing tag after the opening marker. Nesting-blind fallback.
fn find_first_closing_tag(content: &str, open_end: usize) -> Option<usize> {
    content[open_end..]
        .find(CLOSING_TAG)
        .map(|pos| pos + open_end)
}

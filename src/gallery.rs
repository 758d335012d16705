//! Gallery building: thumbnails, captions, and fragment assembly.
//!
//! Stage 1 of the pipeline. Walks the scanned image list in order and, for
//! each image:
//!
//! 1. Creates the thumbnail if — and only if — no file with the same name
//!    exists in the thumbnail directory. A resize failure skips the image
//!    entirely: no fragment entry, no count, no retry within the run (the
//!    next run retries naturally, since the thumbnail still doesn't exist).
//! 2. Resolves the caption ([`crate::metadata`]).
//! 3. Renders one HTML block, quote-escaping the caption for attribute
//!    positions only.
//!
//! The blocks are joined with newlines and written to the fragment file
//! unconditionally — an empty directory produces an empty file, not an
//! error. Progress is reported as [`BuildEvent`] values over an optional
//! channel so the core stays silent and testable.

use crate::config::GalleryConfig;
use crate::imaging::{ImageBackend, ThumbnailParams};
use crate::metadata;
use crate::scan::{self, ImageEntry, ScanError};
use maud::{Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Progress events emitted while building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    ThumbnailCreated { filename: String },
    ThumbnailFailed { filename: String, cause: String },
    Summary { count: usize },
}

/// Result of a gallery build.
#[derive(Debug)]
pub struct BuildResult {
    /// The assembled fragment, as persisted to the fragment file.
    pub fragment: String,
    /// Images that made it into the fragment. Resize failures are excluded.
    pub count: usize,
}

/// Status of one image for the `check` command — computed without writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStatus {
    pub filename: String,
    pub thumbnail_exists: bool,
    pub has_sidecar: bool,
}

/// Build the gallery: thumbnails, captions, fragment.
///
/// Fails only on a missing source directory, a thumbnail-directory creation
/// failure, or a fragment write failure. Per-image resize failures are
/// reported as events and skipped.
pub fn build(
    config: &GalleryConfig,
    backend: &impl ImageBackend,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildResult, BuildError> {
    // Source check first: a missing source aborts before any output exists
    let entries = scan::list_images(config)?;
    fs::create_dir_all(&config.thumb_dir)?;

    let mut blocks = Vec::new();
    for entry in &entries {
        if !entry.thumb_path.exists() {
            let params = ThumbnailParams {
                source: entry.source_path.clone(),
                output: entry.thumb_path.clone(),
                max_dimension: config.thumb_max_dimension,
            };
            match backend.thumbnail(&params) {
                Ok(()) => send(
                    &events,
                    BuildEvent::ThumbnailCreated {
                        filename: entry.filename.clone(),
                    },
                ),
                Err(err) => {
                    send(
                        &events,
                        BuildEvent::ThumbnailFailed {
                            filename: entry.filename.clone(),
                            cause: err.to_string(),
                        },
                    );
                    continue;
                }
            }
        }

        let caption = metadata::resolve_caption(&entry.source_path)?;
        blocks.push(render_block(config, entry, &caption).into_string());
    }

    let count = blocks.len();
    let fragment = blocks.join("\n");
    fs::write(&config.fragment_file, &fragment)?;
    send(&events, BuildEvent::Summary { count });

    Ok(BuildResult { fragment, count })
}

/// Inspect the source directory without writing anything.
pub fn inspect(config: &GalleryConfig) -> Result<Vec<EntryStatus>, BuildError> {
    let entries = scan::list_images(config)?;
    Ok(entries
        .into_iter()
        .map(|e| EntryStatus {
            thumbnail_exists: e.thumb_path.exists(),
            has_sidecar: metadata::sidecar_path(&e.source_path).exists(),
            filename: e.filename,
        })
        .collect())
}

fn send(events: &Option<Sender<BuildEvent>>, event: BuildEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}

/// Escape a caption for an HTML attribute value.
///
/// Only double quotes are rewritten; everything else passes through
/// verbatim. This is the gallery's whole escaping contract — the visible
/// caption element is not escaped at all.
pub fn escape_attribute(caption: &str) -> String {
    caption.replace('"', "&quot;")
}

/// Render one gallery block.
///
/// `PreEscaped` is deliberate throughout: the paths and the caption carry
/// their own escaping contract and maud must not widen it.
fn render_block(config: &GalleryConfig, entry: &ImageEntry, caption: &str) -> Markup {
    let href = rel_href(&config.source_dir, &entry.filename);
    let thumb = rel_href(&config.thumb_dir, &entry.filename);
    let escaped = escape_attribute(caption);
    html! {
        div.thumb {
            a href=(PreEscaped(&href)) data-lightbox=(config.lightbox_group) data-title=(PreEscaped(&escaped)) {
                img src=(PreEscaped(&thumb)) alt=(PreEscaped(&escaped));
            }
            div.caption { (PreEscaped(caption)) }
        }
    }
}

/// URL-ish relative path for a file inside a directory, forward slashes.
fn rel_href(dir: &Path, filename: &str) -> String {
    format!("{}/{}", dir.display(), filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use std::fs;
    use std::path::Path;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn test_config(root: &Path) -> GalleryConfig {
        GalleryConfig {
            source_dir: root.join("assets"),
            thumb_dir: root.join("assets/thumb"),
            fragment_file: root.join("gallery_fragment.html"),
            document_file: root.join("index.html"),
            ..GalleryConfig::default()
        }
    }

    fn setup(root: &Path, images: &[&str]) -> GalleryConfig {
        let config = test_config(root);
        fs::create_dir_all(&config.source_dir).unwrap();
        for name in images {
            fs::write(config.source_dir.join(name), b"fake image").unwrap();
        }
        config
    }

    fn build_collecting(
        config: &GalleryConfig,
        backend: &impl ImageBackend,
    ) -> (BuildResult, Vec<BuildEvent>) {
        let (tx, rx) = mpsc::channel();
        let result = build(config, backend, Some(tx)).unwrap();
        (result, rx.try_iter().collect())
    }

    // =========================================================================
    // Basics
    // =========================================================================

    #[test]
    fn missing_source_directory_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());
        let result = build(&config, &MockBackend::new(), None);
        assert!(matches!(
            result,
            Err(BuildError::Scan(ScanError::DirectoryNotFound(_)))
        ));
        // Aborted before any output: no thumb dir, no fragment
        assert!(!config.thumb_dir.exists());
        assert!(!config.fragment_file.exists());
    }

    #[test]
    fn empty_directory_writes_empty_fragment() {
        let tmp = TempDir::new().unwrap();
        let config = setup(tmp.path(), &[]);
        let result = build(&config, &MockBackend::new(), None).unwrap();

        assert_eq!(result.count, 0);
        assert_eq!(result.fragment, "");
        assert_eq!(fs::read_to_string(&config.fragment_file).unwrap(), "");
        assert!(config.thumb_dir.is_dir());
    }

    #[test]
    fn fragment_file_matches_returned_fragment() {
        let tmp = TempDir::new().unwrap();
        let config = setup(tmp.path(), &["a.jpg", "b.png"]);
        let result = build(&config, &MockBackend::new(), None).unwrap();

        assert_eq!(result.count, 2);
        assert_eq!(
            fs::read_to_string(&config.fragment_file).unwrap(),
            result.fragment
        );
    }

    #[test]
    fn blocks_ordered_by_filename_byte_order() {
        let tmp = TempDir::new().unwrap();
        let config = setup(tmp.path(), &["b.png", "a.jpg", "C.gif"]);
        let result = build(&config, &MockBackend::new(), None).unwrap();

        let pos = |name: &str| result.fragment.find(&format!("/{name}\"")).unwrap();
        assert!(pos("C.gif") < pos("a.jpg"));
        assert!(pos("a.jpg") < pos("b.png"));
        assert_eq!(result.fragment.matches("\n").count(), 2);
    }

    // =========================================================================
    // Block shape & escaping
    // =========================================================================

    #[test]
    fn block_has_expected_shape() {
        let tmp = TempDir::new().unwrap();
        let config = setup(tmp.path(), &["dunes.jpg"]);
        fs::write(config.source_dir.join("dunes.txt"), "Dunes at dusk").unwrap();

        let result = build(&config, &MockBackend::new(), None).unwrap();
        let expected = format!(
            "<div class=\"thumb\"><a href=\"{src}/dunes.jpg\" data-lightbox=\"galerie\" \
             data-title=\"Dunes at dusk\"><img src=\"{thumb}/dunes.jpg\" \
             alt=\"Dunes at dusk\"></a><div class=\"caption\">Dunes at dusk</div></div>",
            src = config.source_dir.display(),
            thumb = config.thumb_dir.display(),
        );
        assert_eq!(result.fragment, expected);
    }

    #[test]
    fn caption_quotes_escaped_in_attributes_only() {
        let tmp = TempDir::new().unwrap();
        let config = setup(tmp.path(), &["a.jpg"]);
        fs::write(config.source_dir.join("a.txt"), "He said \"hi\"").unwrap();

        let result = build(&config, &MockBackend::new(), None).unwrap();
        assert!(
            result
                .fragment
                .contains("data-title=\"He said &quot;hi&quot;\"")
        );
        assert!(result.fragment.contains("alt=\"He said &quot;hi&quot;\""));
        assert!(
            result
                .fragment
                .contains("<div class=\"caption\">He said \"hi\"</div>")
        );
    }

    #[test]
    fn caption_markup_passes_through_verbatim() {
        let tmp = TempDir::new().unwrap();
        let config = setup(tmp.path(), &["a.jpg"]);
        fs::write(config.source_dir.join("a.txt"), "Fish & <chips>").unwrap();

        let result = build(&config, &MockBackend::new(), None).unwrap();
        // Only double quotes are ever rewritten; & and < are not
        assert!(result.fragment.contains("data-title=\"Fish & <chips>\""));
        assert!(
            result
                .fragment
                .contains("<div class=\"caption\">Fish & <chips></div>")
        );
    }

    #[test]
    fn escape_attribute_only_touches_quotes() {
        assert_eq!(escape_attribute("plain"), "plain");
        assert_eq!(escape_attribute("a \"b\" c"), "a &quot;b&quot; c");
        assert_eq!(escape_attribute("<&'>"), "<&'>");
    }

    // =========================================================================
    // Captions
    // =========================================================================

    #[test]
    fn sidecar_caption_trimmed() {
        let tmp = TempDir::new().unwrap();
        let config = setup(tmp.path(), &["photo.jpg"]);
        fs::write(config.source_dir.join("photo.txt"), "  Sunset  ").unwrap();

        let result = build(&config, &MockBackend::new(), None).unwrap();
        assert!(
            result
                .fragment
                .contains("<div class=\"caption\">Sunset</div>")
        );
    }

    #[test]
    fn date_fallback_without_sidecar() {
        let tmp = TempDir::new().unwrap();
        let config = setup(tmp.path(), &["photo.jpg"]);

        let result = build(&config, &MockBackend::new(), None).unwrap();
        let expected =
            crate::metadata::modified_date(&config.source_dir.join("photo.jpg")).unwrap();
        assert!(
            result
                .fragment
                .contains(&format!("<div class=\"caption\">{expected}</div>"))
        );
    }

    // =========================================================================
    // Thumbnail cache & skip-on-failure
    // =========================================================================

    #[test]
    fn existing_thumbnail_not_regenerated() {
        let tmp = TempDir::new().unwrap();
        let config = setup(tmp.path(), &["a.jpg"]);
        fs::create_dir_all(&config.thumb_dir).unwrap();
        fs::write(config.thumb_dir.join("a.jpg"), b"existing thumb").unwrap();

        let backend = MockBackend::new();
        let (result, events) = build_collecting(&config, &backend);

        assert_eq!(result.count, 1);
        assert!(backend.get_operations().is_empty());
        assert_eq!(events, vec![BuildEvent::Summary { count: 1 }]);
        // Existing file untouched: no staleness re-validation
        assert_eq!(
            fs::read(config.thumb_dir.join("a.jpg")).unwrap(),
            b"existing thumb"
        );
    }

    #[test]
    fn second_run_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let config = setup(tmp.path(), &["a.jpg", "b.png"]);
        fs::write(config.source_dir.join("a.txt"), "Alpha").unwrap();

        let first = build(&config, &MockBackend::new(), None).unwrap();

        let backend = MockBackend::new();
        let second = build(&config, &backend, None).unwrap();

        assert_eq!(first.fragment, second.fragment);
        assert_eq!(second.count, 2);
        // All thumbnails existed; no backend work on the second run
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn resize_failure_skips_image_and_continues() {
        let tmp = TempDir::new().unwrap();
        let config = setup(tmp.path(), &["a.jpg", "bad.jpg", "c.png"]);
        let backend = MockBackend::failing_on(vec![config.source_dir.join("bad.jpg")]);

        let (result, events) = build_collecting(&config, &backend);

        assert_eq!(result.count, 2);
        assert!(!result.fragment.contains("bad.jpg"));
        assert!(result.fragment.contains("a.jpg"));
        assert!(result.fragment.contains("c.png"));

        assert_eq!(
            events,
            vec![
                BuildEvent::ThumbnailCreated {
                    filename: "a.jpg".to_string()
                },
                BuildEvent::ThumbnailFailed {
                    filename: "bad.jpg".to_string(),
                    cause: "Processing failed: mock decode failure".to_string()
                },
                BuildEvent::ThumbnailCreated {
                    filename: "c.png".to_string()
                },
                BuildEvent::Summary { count: 2 },
            ]
        );
    }

    #[test]
    fn failed_image_retried_on_next_run() {
        let tmp = TempDir::new().unwrap();
        let config = setup(tmp.path(), &["bad.jpg"]);
        let failing = MockBackend::failing_on(vec![config.source_dir.join("bad.jpg")]);

        let result = build(&config, &failing, None).unwrap();
        assert_eq!(result.count, 0);

        // The thumbnail still doesn't exist, so a healthy run picks it up
        let healthy = MockBackend::new();
        let result = build(&config, &healthy, None).unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(healthy.get_operations().len(), 1);
    }

    // =========================================================================
    // inspect()
    // =========================================================================

    #[test]
    fn inspect_reports_status_without_writing() {
        let tmp = TempDir::new().unwrap();
        let config = setup(tmp.path(), &["a.jpg", "b.png"]);
        fs::write(config.source_dir.join("a.txt"), "Alpha").unwrap();
        fs::create_dir_all(&config.thumb_dir).unwrap();
        fs::write(config.thumb_dir.join("b.png"), b"thumb").unwrap();

        let statuses = inspect(&config).unwrap();
        assert_eq!(
            statuses,
            vec![
                EntryStatus {
                    filename: "a.jpg".to_string(),
                    thumbnail_exists: false,
                    has_sidecar: true,
                },
                EntryStatus {
                    filename: "b.png".to_string(),
                    thumbnail_exists: true,
                    has_sidecar: false,
                },
            ]
        );
        assert!(!config.fragment_file.exists());
    }
}

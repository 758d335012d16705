//! Gallery configuration.
//!
//! Every knob of the pipeline — directories, thumbnail bound, extension
//! list, lightbox group, marker strings — lives in [`GalleryConfig`]. The
//! stock values reproduce the layout the tool was built for:
//!
//! ```text
//! project/
//! ├── config.toml              # Optional; stock values apply when absent
//! ├── index.html               # Host document, patched in place
//! ├── gallery_fragment.html    # Generated fragment (overwritten each run)
//! └── assets/
//!     ├── 2024-dunes.jpg       # Source image
//!     ├── 2024-dunes.txt       # Optional sidecar caption
//!     └── thumb/
//!         └── 2024-dunes.jpg   # Generated thumbnail
//! ```
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only bump the thumbnail bound
//! thumb_max_dimension = 480
//! ```
//!
//! Unknown keys are rejected to catch typos early. Run `lightgrid gen-config`
//! for a documented stock file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Pipeline configuration loaded from `config.toml`.
///
/// All fields have stock defaults; user config files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Directory of source images (plus optional sidecar captions).
    pub source_dir: PathBuf,
    /// Directory of generated thumbnails, created on demand.
    pub thumb_dir: PathBuf,
    /// Standalone fragment file, fully overwritten each run.
    pub fragment_file: PathBuf,
    /// Host document patched in place when the grid marker is present.
    pub document_file: PathBuf,
    /// Bounding box for thumbnails: neither edge exceeds this, aspect kept.
    pub thumb_max_dimension: u32,
    /// Recognized image extensions, lowercase, without the leading dot.
    pub extensions: Vec<String>,
    /// Value of the `data-lightbox` grouping attribute on every block.
    pub lightbox_group: String,
    /// Opening marker locating the grid container in the host document.
    pub grid_marker: String,
    /// Marker of the section following the grid; anchors the backward
    /// search for the grid's own closing tag.
    pub next_section_marker: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("assets"),
            thumb_dir: PathBuf::from("assets/thumb"),
            fragment_file: PathBuf::from("gallery_fragment.html"),
            document_file: PathBuf::from("index.html"),
            thumb_max_dimension: 300,
            extensions: ["jpg", "jpeg", "png", "gif", "webp", "svg"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            lightbox_group: "galerie".to_string(),
            grid_marker: r#"<div class="grid">"#.to_string(),
            next_section_marker: r#"<div class="w3-container">"#.to_string(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumb_max_dimension == 0 {
            return Err(ConfigError::Validation(
                "thumb_max_dimension must be at least 1".into(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if self.grid_marker.is_empty() || self.next_section_marker.is_empty() {
            return Err(ConfigError::Validation(
                "marker strings must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from `path`, falling back to stock values when the
/// file does not exist. A file that exists but fails to parse or validate
/// is an error — silently ignoring a broken config hides typos.
pub fn load(path: &Path) -> Result<GalleryConfig, ConfigError> {
    if !path.exists() {
        return Ok(GalleryConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: GalleryConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A stock `config.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> String {
    r##"# lightgrid configuration. All values shown are the stock defaults;
# delete any line you don't want to override.

# Directory of source images. Sidecar captions live beside them:
# "dunes.jpg" is captioned by "dunes.txt" when that file exists,
# otherwise by the image's modification date (YYYY.MM.DD).
source_dir = "assets"

# Directory of generated thumbnails (created on demand). A thumbnail is
# only generated when missing — delete one to force regeneration.
thumb_dir = "assets/thumb"

# Standalone fragment file, fully overwritten each run.
fragment_file = "gallery_fragment.html"

# Host document. Patched in place when the grid marker is found;
# left untouched (with a notice) otherwise.
document_file = "index.html"

# Thumbnails fit inside a square box of this size. Aspect ratio is kept
# and images already within the box are not upscaled.
thumb_max_dimension = 300

# Recognized image extensions (matched case-insensitively, no dot).
extensions = ["jpg", "jpeg", "png", "gif", "webp", "svg"]

# data-lightbox group shared by every gallery link.
lightbox_group = "galerie"

# Literal markers used to locate the replaceable grid region.
grid_marker = '<div class="grid">'
next_section_marker = '<div class="w3-container">'
"##
    .to_string()
}

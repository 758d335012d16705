//! Pure Rust thumbnail backend — everything statically linked.
//!
//! Decodes with the `image` crate (JPEG, PNG, GIF, WebP decoders compiled
//! in), resizes with Lanczos3 to the bounded-fit dimensions, and encodes
//! back to the source's own format, inferred from the output extension.
//!
//! SVG has no decoder here (the `image` crate does not read vector
//! formats); SVG sources therefore fail with a decode error and the
//! gallery stage skips them.

use super::backend::{BackendError, ImageBackend, ThumbnailParams};
use super::calculations::calculate_fit_dimensions;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Pure Rust backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

impl ImageBackend for RustBackend {
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let original = (img.width(), img.height());
        let (w, h) = calculate_fit_dimensions(original, params.max_dimension);

        // Images already inside the box are re-encoded as-is
        let out = if (w, h) == original {
            img
        } else {
            img.resize_exact(w, h, FilterType::Lanczos3)
        };

        out.save(&params.output).map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to encode {}: {}",
                params.output.display(),
                e
            ))
        })
    }
}

//! Thumbnail backend trait and shared types.
//!
//! [`ImageBackend`] is the seam between the gallery stage (which decides
//! *which* thumbnails to create) and the pixel work (decode, resize,
//! encode). The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests swap in a
//! recording mock.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Full specification of one thumbnail operation.
///
/// The output must fit within a `max_dimension` square, aspect preserved,
/// encoded in the source's own format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub max_dimension: u32,
}

/// Trait for thumbnail backends.
///
/// Any decode, resize, or write failure is reported as an error; the
/// gallery stage catches it and skips the image rather than aborting.
pub trait ImageBackend {
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError>;
}

//! Thumbnail generation — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (JPEG, PNG, GIF, WebP) | `image::ImageReader` |
//! | **Bounded resize** | Lanczos3, dimensions from [`calculate_fit_dimensions`] |
//! | **Encode** | `image::DynamicImage::save` (format inferred from extension) |
//!
//! The module is split into:
//! - **Calculations**: pure dimension math (unit testable)
//! - **Backend**: [`ImageBackend`] trait + [`ThumbnailParams`]
//! - **RustBackend**: the production implementation

pub mod backend;
mod calculations;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend, ThumbnailParams};
pub use calculations::calculate_fit_dimensions;
pub use rust_backend::RustBackend;

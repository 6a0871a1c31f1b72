//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend
//! must support: identify, caption, and thumbnail. Caption and thumbnail
//! both rewrite the image at its own path.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::layout::CaptionLayout;
use super::params::{CaptionParams, ThumbnailParams};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures of a single image operation. None of them are retried.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Source file missing, unreadable, or undecodable. Nothing was written.
    #[error("Failed to load image {}: {reason}", .path.display())]
    ImageLoad { path: PathBuf, reason: String },
    /// Typeface resource missing or corrupt. Nothing was written.
    #[error("Failed to load font {}: {reason}", .path.display())]
    FontLoad { path: PathBuf, reason: String },
    /// Destination unwritable; the file may be partially written.
    #[error("Failed to write image {}: {reason}", .path.display())]
    ImageWrite { path: PathBuf, reason: String },
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Trait for image processing backends.
///
/// Every backend implements all three operations so the rest of the
/// codebase is backend-agnostic.
pub trait ImageBackend: Sync {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Burn a meme caption into the image and overwrite it.
    ///
    /// Returns the layout that was drawn.
    fn caption(&self, params: &CaptionParams) -> Result<CaptionLayout, BackendError>;

    /// Shrink the image to fit a bounding box and overwrite it.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError>;
}

//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! and the [`backend`](super::backend) that does the pixel work, so a mock
//! backend can stand in during tests.
//!
//! ## Types
//!
//! - [`Caption`]: top/bottom caption pair, uppercased on construction.
//! - [`CaptionParams`]: image path (read and overwritten), caption, font resource.
//! - [`ThumbnailParams`]: in-place shrink of an image to fit a bounding box.

use std::path::PathBuf;

/// Top and bottom caption text, normalized to uppercase.
///
/// Either side may be empty, which leaves that band undrawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caption {
    top: String,
    bottom: String,
}

impl Caption {
    pub fn new(top: &str, bottom: &str) -> Self {
        Self {
            top: top.to_uppercase(),
            bottom: bottom.to_uppercase(),
        }
    }

    pub fn top(&self) -> &str {
        &self.top
    }

    pub fn bottom(&self) -> &str {
        &self.bottom
    }

    pub fn is_empty(&self) -> bool {
        self.top.trim().is_empty() && self.bottom.trim().is_empty()
    }
}

/// Parameters for burning a caption into an image in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionParams {
    /// Image to read; the captioned result overwrites it.
    pub path: PathBuf,
    pub caption: Caption,
    /// Typeface resource.
    pub font: PathBuf,
}

/// Parameters for shrinking an image in place to fit a bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub path: PathBuf,
    pub max_width: u32,
    pub max_height: u32,
}

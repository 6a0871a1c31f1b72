//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{fit_within, font_size_for_height};
use super::font::CaptionFont;
use super::layout::{CaptionLayout, plan_caption};
use super::params::{Caption, CaptionParams, ThumbnailParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok(dims.as_tuple())
}

/// Burn a meme caption into the image at `image_path`, overwriting it.
///
/// Both captions are uppercased. An empty caption leaves its band
/// untouched. The original pixels are not kept anywhere.
pub fn compose_meme(
    backend: &impl ImageBackend,
    image_path: &Path,
    top: &str,
    bottom: &str,
    font: &Path,
) -> Result<CaptionLayout> {
    backend.caption(&CaptionParams {
        path: image_path.to_path_buf(),
        caption: Caption::new(top, bottom),
        font: font.to_path_buf(),
    })
}

/// Compute the layout [`compose_meme`] would draw, without writing.
pub fn plan_meme(
    backend: &impl ImageBackend,
    image_path: &Path,
    top: &str,
    bottom: &str,
    font: &Path,
) -> Result<CaptionLayout> {
    let dims = get_dimensions(backend, image_path)?;
    let font = CaptionFont::load(font)?;
    let font_size = font_size_for_height(dims.1);
    Ok(plan_caption(
        dims,
        font_size,
        &Caption::new(top, bottom),
        &font.sized(font_size),
    ))
}

/// Shrink the image in place to fit `bounds` (width, height).
///
/// Returns the new dimensions, or `None` when the image already fits and
/// was left alone.
pub fn shrink_to_fit(
    backend: &impl ImageBackend,
    path: &Path,
    bounds: (u32, u32),
) -> Result<Option<(u32, u32)>> {
    let source = get_dimensions(backend, path)?;
    let target = fit_within(source, bounds);
    if target == source {
        return Ok(None);
    }

    backend.thumbnail(&ThumbnailParams {
        path: path.to_path_buf(),
        max_width: bounds.0,
        max_height: bounds.1,
    })?;
    Ok(Some(target))
}

//! Image processing: meme captions and in-place resizing.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::with_guessed_format` + `into_dimensions` |
//! | **Caption** | `ab_glyph` metrics + `imageproc::drawing::draw_text_mut` |
//! | **Thumbnail** | `DynamicImage::resize_exact` (Lanczos3) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for sizing and wrapping (unit testable)
//! - **Font**: Typeface loading and text measurement
//! - **Layout**: Line placement for a caption on a given image
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
pub mod calculations;
pub mod font;
pub mod layout;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use font::{CaptionFont, TextMeasure, TextSize};
pub use layout::{Band, CaptionLayout, PlacedLine};
pub use operations::{compose_meme, get_dimensions, plan_meme, shrink_to_fit};
pub use params::{Caption, CaptionParams, ThumbnailParams};
pub use rust_backend::{RustBackend, is_supported_image};

//! Shared test utilities.
//!
//! Provides the bundled caption font, synthetic image fixtures written to a
//! temp directory, and pixel-region comparisons.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = tmp.path().join("photo.png");
//! create_gray_png(&path, 400, 300);
//!
//! // ... caption it ...
//!
//! assert_region_eq(&before, &after, 0..100);
//! ```

use image::{ImageEncoder, Rgb, RgbImage, RgbaImage};
use std::ops::Range;
use std::path::{Path, PathBuf};

// =========================================================================
// Fixtures
// =========================================================================

/// Path to the font shipped in `fonts/`.
pub fn bundled_font_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fonts/caption.ttf")
}

/// Write a gradient JPEG with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = gradient(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a gradient PNG with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    gradient(width, height).save(path).unwrap();
}

/// Write a flat mid-gray PNG, so black and white caption pixels stand out.
pub fn create_gray_png(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([128, 128, 128]))
        .save(path)
        .unwrap();
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Decode an image file to RGBA for pixel comparisons.
pub fn read_rgba(path: &Path) -> RgbaImage {
    image::open(path).unwrap().into_rgba8()
}

// =========================================================================
// Pixel assertions
// =========================================================================

/// Assert two images have identical pixels in the given row range.
pub fn assert_region_eq(a: &RgbaImage, b: &RgbaImage, rows: Range<u32>) {
    assert_eq!(a.dimensions(), b.dimensions(), "image dimensions differ");
    for y in rows {
        for x in 0..a.width() {
            assert_eq!(
                a.get_pixel(x, y),
                b.get_pixel(x, y),
                "pixel ({x}, {y}) differs"
            );
        }
    }
}

/// Count pixels within `tolerance` of the given RGB value inside a row range.
///
/// Anti-aliased coverage rarely reaches exactly 1.0, so fully covered glyph
/// pixels can land a step short of the target color.
pub fn count_near(img: &RgbaImage, rgb: [u8; 3], tolerance: u8, rows: Range<u32>) -> usize {
    rows.flat_map(|y| (0..img.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| {
            let p = img.get_pixel(x, y);
            (0..3).all(|c| p[c].abs_diff(rgb[c]) <= tolerance)
        })
        .count()
}

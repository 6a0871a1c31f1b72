//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, BMP, TIFF, WebP) | `image` crate, format sniffed from content |
//! | Encode | `image` crate, format chosen by extension |
//! | Font loading and metrics | `ab_glyph` via [`CaptionFont`] |
//! | Text rasterization | `imageproc::drawing::draw_text_mut` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` filter |
//!
//! Both write operations overwrite the source path. Callers that need the
//! original must copy it first (see [`publish`](crate::publish)).

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{fit_within, font_size_for_height, stroke_positions};
use super::font::{CaptionFont, SizedFont};
use super::layout::{CaptionLayout, plan_caption};
use super::params::{CaptionParams, ThumbnailParams};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageFormat, ImageReader, Pixel, Rgba};
use imageproc::definitions::Clamp;
use imageproc::drawing::{Canvas, draw_text_mut};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

const OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 255]);
const FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const OUTLINE_16: Rgba<u16> = Rgba([0, 0, 0, u16::MAX]);
const FILL_16: Rgba<u16> = Rgba([u16::MAX; 4]);

/// Extensions the compiled-in codecs can both read and write.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("gif", ImageFormat::Gif),
    ("bmp", ImageFormat::Bmp),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

/// Returns the image file extensions that have working codecs compiled in.
pub fn supported_extensions() -> Vec<&'static str> {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled() && fmt.writing_enabled())
        .map(|(ext, _)| *ext)
        .collect()
}

/// Whether `path` has an extension in [`supported_extensions`].
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// Pure Rust backend using the `image` and `imageproc` crates.
///
/// See the [module docs](self) for the crate-to-operation mapping.
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

/// Open `path` with the format sniffed from its content, so an upload
/// whose extension lies about its encoding still decodes.
fn open_reader(path: &Path) -> Result<ImageReader<BufReader<File>>, BackendError> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| load_error(path, e))
}

fn load_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::ImageLoad {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open_reader(path)?.decode().map_err(|e| load_error(path, e))
}

/// Whether the source stores more than 8 bits per channel.
fn is_wide(color: ColorType) -> bool {
    color.bytes_per_pixel() > color.channel_count()
}

/// Convert a working canvas back to the color model of the source, so the
/// file keeps its channels and bit depth.
fn restore_color(img: DynamicImage, original: ColorType) -> DynamicImage {
    match original {
        ColorType::L8 => DynamicImage::ImageLuma8(img.into_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(img.into_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(img.into_rgb8()),
        ColorType::Rgba8 => DynamicImage::ImageRgba8(img.into_rgba8()),
        ColorType::L16 => DynamicImage::ImageLuma16(img.into_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(img.into_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(img.into_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(img.into_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(img.into_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(img.into_rgba32f()),
        _ => img,
    }
}

/// Save to `path`, choosing the encoder from the extension.
fn save_image(img: DynamicImage, path: &Path) -> Result<(), BackendError> {
    let write_error = |reason: String| BackendError::ImageWrite {
        path: path.to_path_buf(),
        reason,
    };
    let format = ImageFormat::from_path(path).map_err(|e| write_error(e.to_string()))?;

    // JPEG stores 8-bit gray or RGB only.
    let img = match (format, img.color()) {
        (ImageFormat::Jpeg, ColorType::L8 | ColorType::Rgb8) => img,
        (ImageFormat::Jpeg, ColorType::La8 | ColorType::L16 | ColorType::La16) => {
            DynamicImage::ImageLuma8(img.into_luma8())
        }
        (ImageFormat::Jpeg, _) => DynamicImage::ImageRgb8(img.into_rgb8()),
        _ => img,
    };

    img.save_with_format(path, format)
        .map_err(|e| write_error(e.to_string()))
}

/// Draw every planned line: four `outline` passes offset around the
/// origin, then the `fill` on top.
fn draw_layout<C>(
    canvas: &mut C,
    layout: &CaptionLayout,
    font: &SizedFont<'_>,
    outline: C::Pixel,
    fill: C::Pixel,
) where
    C: Canvas,
    <C::Pixel as Pixel>::Subpixel: Into<f32> + Clamp<f32>,
{
    for line in &layout.lines {
        for (x, y) in stroke_positions(line.x, line.y) {
            draw_text_mut(canvas, outline, x, y, font.scale(), font.font(), &line.text);
        }
        draw_text_mut(
            canvas,
            fill,
            line.x,
            line.y,
            font.scale(),
            font.font(),
            &line.text,
        );
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_reader(path)?
            .into_dimensions()
            .map_err(|e| load_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    #[tracing::instrument(skip_all, fields(path = %params.path.display()))]
    fn caption(&self, params: &CaptionParams) -> Result<CaptionLayout, BackendError> {
        let img = load_image(&params.path)?;
        let font = CaptionFont::load(&params.font)?;

        let dims = (img.width(), img.height());
        let font_size = font_size_for_height(dims.1);
        let sized = font.sized(font_size);
        let layout = plan_caption(dims, font_size, &params.caption, &sized);
        debug!(
            font_size,
            chars_per_line = layout.chars_per_line,
            lines = layout.lines.len(),
            "planned caption"
        );

        // Draw at the source's depth so 16-bit images keep their precision.
        let original = img.color();
        let drawn = if is_wide(original) {
            let mut canvas = img.into_rgba16();
            draw_layout(&mut canvas, &layout, &sized, OUTLINE_16, FILL_16);
            DynamicImage::ImageRgba16(canvas)
        } else {
            let mut canvas = img.into_rgba8();
            draw_layout(&mut canvas, &layout, &sized, OUTLINE, FILL);
            DynamicImage::ImageRgba8(canvas)
        };
        save_image(restore_color(drawn, original), &params.path)?;

        info!("captioned {}", params.path.display());
        Ok(layout)
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
        let img = load_image(&params.path)?;
        let source = (img.width(), img.height());
        let (width, height) = fit_within(source, (params.max_width, params.max_height));
        if (width, height) == source {
            debug!("{} already fits", params.path.display());
            return Ok(());
        }

        let resized = img.resize_exact(width, height, FilterType::Lanczos3);
        save_image(resized, &params.path)?;

        info!(
            "resized {} from {}x{} to {}x{}",
            params.path.display(),
            source.0,
            source.1,
            width,
            height
        );
        Ok(())
    }
}

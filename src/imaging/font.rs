//! Caption typeface loading and text measurement.
//!
//! Measurement follows the rendered box of a string drawn from the top-left
//! origin: width is the advance of every glyph plus kerning, height is the
//! lowest inked pixel below the top of the line. For a capital `A` that is
//! the baseline, which is what the wrap estimate and the bottom-band anchor
//! rely on.

use super::backend::BackendError;
use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use std::path::Path;

/// Glyph used to estimate the average character width for wrapping.
pub const REFERENCE_GLYPH: &str = "A";

/// Rendered size of a string in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

/// Anything that can report the pixel size of a line of text at a fixed
/// font size.
///
/// Layout only needs measurements, so tests can substitute a fixed-advance
/// measurer for a real font.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> TextSize;
}

/// A loaded caption typeface.
pub struct CaptionFont {
    font: FontVec,
}

impl CaptionFont {
    /// Load a TrueType/OpenType font from disk.
    pub fn load(path: &Path) -> Result<Self, BackendError> {
        let data = std::fs::read(path).map_err(|e| BackendError::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(data).map_err(|reason| BackendError::FontLoad {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn from_bytes(data: Vec<u8>) -> Result<Self, String> {
        FontVec::try_from_vec(data)
            .map(|font| Self { font })
            .map_err(|e| e.to_string())
    }

    /// Bind the font to a pixel size.
    pub fn sized(&self, px: u32) -> SizedFont<'_> {
        SizedFont {
            font: &self.font,
            scale: PxScale::from(px as f32),
        }
    }
}

/// A [`CaptionFont`] at a fixed pixel size.
#[derive(Clone, Copy)]
pub struct SizedFont<'a> {
    font: &'a FontVec,
    scale: PxScale,
}

impl<'a> SizedFont<'a> {
    pub fn font(&self) -> &'a FontVec {
        self.font
    }

    pub fn scale(&self) -> PxScale {
        self.scale
    }
}

impl TextMeasure for SizedFont<'_> {
    fn measure(&self, text: &str) -> TextSize {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = 0.0f32;
        let mut bottom = 0.0f32;
        let mut last: Option<GlyphId> = None;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = last {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(self.scale, point(caret, scaled.ascent()));
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                bottom = bottom.max(outlined.px_bounds().max.y);
            }
            caret += scaled.h_advance(id);
            last = Some(id);
        }

        TextSize {
            width: caret.max(0.0).ceil() as u32,
            height: bottom.max(0.0).ceil() as u32,
        }
    }
}

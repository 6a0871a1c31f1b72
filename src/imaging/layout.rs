//! Caption layout: where every line of a meme caption goes.
//!
//! ```text
//! y = 10 ─────────► ┌──────────────────────────────┐
//!                   │      ONE DOES NOT SIMPLY     │  top band, grows down
//!                   │          WALK INTO           │
//!                   │                              │
//!                   │                              │
//!                   │           MORDOR             │  bottom band, anchored
//! 15px above ─────► │                              │  by reference height
//! bottom            └──────────────────────────────┘
//! ```
//!
//! Layout is separated from drawing so it can be computed (and inspected by
//! the `layout` CLI command) without touching pixels.

use super::calculations::{
    TOP_MARGIN, bottom_block_start, centered_x, chars_per_line, wrap_words,
};
use super::font::{REFERENCE_GLYPH, TextMeasure, TextSize};
use super::params::Caption;

/// Which caption band a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Top,
    Bottom,
}

impl Band {
    pub fn label(self) -> &'static str {
        match self {
            Band::Top => "top",
            Band::Bottom => "bottom",
        }
    }
}

/// One wrapped caption line with its top-left drawing origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    pub band: Band,
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Complete placement of a caption on one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionLayout {
    pub image_width: u32,
    pub image_height: u32,
    pub font_size: u32,
    /// Measured size of the reference glyph at `font_size`.
    pub reference: TextSize,
    pub chars_per_line: usize,
    /// Top lines first, then bottom lines, each in drawing order.
    pub lines: Vec<PlacedLine>,
}

impl CaptionLayout {
    pub fn band(&self, band: Band) -> impl Iterator<Item = &PlacedLine> {
        self.lines.iter().filter(move |l| l.band == band)
    }
}

/// Plan caption placement for an image of `dims` (width, height).
pub fn plan_caption(
    dims: (u32, u32),
    font_size: u32,
    caption: &Caption,
    measure: &impl TextMeasure,
) -> CaptionLayout {
    let (image_width, image_height) = dims;
    let reference = measure.measure(REFERENCE_GLYPH);
    let per_line = chars_per_line(image_width, reference.width);

    let top_lines = wrap_words(caption.top(), per_line);
    let bottom_lines = wrap_words(caption.bottom(), per_line);

    let mut lines = Vec::with_capacity(top_lines.len() + bottom_lines.len());
    place_band(&mut lines, Band::Top, top_lines, TOP_MARGIN, image_width, measure);

    let bottom_y = bottom_block_start(image_height, reference.height, bottom_lines.len());
    place_band(&mut lines, Band::Bottom, bottom_lines, bottom_y, image_width, measure);

    CaptionLayout {
        image_width,
        image_height,
        font_size,
        reference,
        chars_per_line: per_line,
        lines,
    }
}

/// Stack `texts` downward from `y`, centering each one and advancing by
/// its own measured height.
fn place_band(
    out: &mut Vec<PlacedLine>,
    band: Band,
    texts: Vec<String>,
    mut y: i32,
    image_width: u32,
    measure: &impl TextMeasure,
) {
    for text in texts {
        let size = measure.measure(&text);
        out.push(PlacedLine {
            band,
            x: centered_x(image_width, size.width),
            y,
            width: size.width,
            height: size.height,
            text,
        });
        y += size.height as i32;
    }
}

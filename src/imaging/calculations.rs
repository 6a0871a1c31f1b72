//! Pure calculation functions for caption layout and image sizing.
//!
//! All functions here are pure and testable without any I/O, fonts, or images.

/// Font size as a percentage of image height.
pub const FONT_SIZE_PERCENT: u32 = 7;

/// Vertical offset of the first top-band line.
pub const TOP_MARGIN: i32 = 10;

/// Gap between the last bottom-band line and the image bottom edge.
pub const BOTTOM_MARGIN: i32 = 15;

/// Stroke offset in pixels. Not scaled with font size.
pub const STROKE_OFFSET: i32 = 2;

/// Caption font size for an image of the given height.
///
/// `floor(height * 7 / 100)`.
///
/// # Examples
/// ```
/// # use branagram_media::imaging::calculations::font_size_for_height;
/// assert_eq!(font_size_for_height(300), 21);
/// assert_eq!(font_size_for_height(1080), 75);
/// ```
pub fn font_size_for_height(height: u32) -> u32 {
    (height as u64 * FONT_SIZE_PERCENT as u64 / 100) as u32
}

/// Number of characters that fit on one line, estimated from the width of
/// the reference glyph.
///
/// Never less than 1. A zero-width reference glyph is treated as 1px wide.
pub fn chars_per_line(image_width: u32, reference_width: u32) -> usize {
    let per_line = image_width / reference_width.max(1);
    (per_line as usize).max(1)
}

/// Tab stop used when expanding tabs in caption text.
const TAB_WIDTH: usize = 8;

/// Greedy word-wrap at whitespace boundaries.
///
/// The text is cut into alternating runs of word and whitespace characters
/// (tabs expanded to 8-column stops, every other whitespace character read
/// as a space). Runs are accumulated until the next one would push the line
/// past `width` characters. A whitespace run at the end of a line is
/// dropped, as is one at the start of every line after the first; runs
/// inside a line are kept as typed. A word longer than `width` is never
/// split: it gets a line of its own and overflows.
///
/// # Examples
/// ```
/// # use branagram_media::imaging::calculations::wrap_words;
/// assert_eq!(wrap_words("ONE TWO THREE", 7), vec!["ONE TWO", "THREE"]);
/// assert_eq!(wrap_words("A  B", 7), vec!["A  B"]);
/// assert_eq!(wrap_words("", 7), Vec::<String>::new());
/// ```
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let runs = split_runs(text);
    let mut rest = runs.as_slice();
    let mut lines = Vec::new();

    while !rest.is_empty() {
        if !lines.is_empty() && rest[0].blank {
            rest = &rest[1..];
            continue;
        }

        let mut line: Vec<&Run> = Vec::new();
        let mut len = 0;
        while let Some((run, tail)) = rest.split_first() {
            if len + run.len > width {
                break;
            }
            len += run.len;
            line.push(run);
            rest = tail;
        }
        // Nothing fit: the next run alone is wider than the line.
        if line.is_empty() {
            if let Some((run, tail)) = rest.split_first() {
                line.push(run);
                rest = tail;
            }
        }
        if line.last().is_some_and(|run| run.blank) {
            line.pop();
        }
        if !line.is_empty() {
            lines.push(line.iter().map(|run| run.text.as_str()).collect());
        }
    }
    lines
}

/// A maximal run of word or whitespace characters.
#[derive(Debug)]
struct Run {
    text: String,
    len: usize,
    blank: bool,
}

fn split_runs(text: &str) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut column = 0usize;

    for c in text.chars() {
        let blank = c.is_whitespace();
        let (piece, count) = match c {
            '\t' => {
                let count = TAB_WIDTH - column % TAB_WIDTH;
                (" ".repeat(count), count)
            }
            _ if blank => (" ".to_string(), 1),
            c => (c.to_string(), 1),
        };
        column = if matches!(c, '\n' | '\r') { 0 } else { column + count };

        match runs.last_mut() {
            Some(run) if run.blank == blank => {
                run.text.push_str(&piece);
                run.len += count;
            }
            _ => runs.push(Run {
                text: piece,
                len: count,
                blank,
            }),
        }
    }
    runs
}

/// Horizontal offset that centers a line of `line_width` pixels.
///
/// Negative when the line is wider than the image (an overflowing word).
pub fn centered_x(image_width: u32, line_width: u32) -> i32 {
    ((image_width as i64 - line_width as i64) / 2) as i32
}

/// Starting `y` of the bottom band.
///
/// Anchored with the reference glyph height so the block ends
/// [`BOTTOM_MARGIN`] pixels above the image bottom.
pub fn bottom_block_start(image_height: u32, reference_height: u32, line_count: usize) -> i32 {
    let block = reference_height as i64 * line_count as i64;
    (image_height as i64 - block - BOTTOM_MARGIN as i64) as i32
}

/// Positions for the stroke passes, in drawing order: left, up, right, down.
///
/// The white fill is drawn afterwards at `(x, y)` itself.
pub fn stroke_positions(x: i32, y: i32) -> [(i32, i32); 4] {
    [
        (x - STROKE_OFFSET, y),
        (x, y - STROKE_OFFSET),
        (x + STROKE_OFFSET, y),
        (x, y + STROKE_OFFSET),
    ]
}

/// Dimensions that fit `source` inside a `(max_width, max_height)` box.
///
/// Preserves aspect ratio and never enlarges. Each edge is rounded and kept
/// at least 1px.
///
/// # Examples
/// ```
/// # use branagram_media::imaging::calculations::fit_within;
/// assert_eq!(fit_within((1200, 600), (300, 300)), (300, 150));
/// assert_eq!(fit_within((200, 100), (300, 300)), (200, 100));
/// ```
pub fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;
    if src_w == 0 || src_h == 0 {
        return source;
    }

    let scale = (max_w as f64 / src_w as f64)
        .min(max_h as f64 / src_h as f64)
        .min(1.0);

    let w = ((src_w as f64 * scale).round() as u32).max(1);
    let h = ((src_h as f64 * scale).round() as u32).max(1);
    (w, h)
}

/// Whether an avatar exceeds its square bounding box in either dimension.
pub fn avatar_needs_resize(dims: (u32, u32), max_edge: u32) -> bool {
    let (w, h) = dims;
    h > max_edge || w > max_edge
}

/// Cover images taller than this are candidates for shrinking.
pub const COVER_HEIGHT_LIMIT: u32 = 380;

/// Width limit used by both cover rules.
pub const COVER_WIDTH_LIMIT: u32 = 1500;

/// The cover resize rule as observed in production: shrink only when the
/// image is taller than 380px *and* narrower than 1500px, into a box
/// 380 wide by 1500 tall.
pub fn literal_cover_resize(dims: (u32, u32)) -> Option<(u32, u32)> {
    let (w, h) = dims;
    (h > COVER_HEIGHT_LIMIT && w < COVER_WIDTH_LIMIT)
        .then_some((COVER_HEIGHT_LIMIT, COVER_WIDTH_LIMIT))
}

/// Banner rule: shrink whenever either edge exceeds a 1500x380 box.
pub fn corrected_cover_resize(dims: (u32, u32)) -> Option<(u32, u32)> {
    let (w, h) = dims;
    (h > COVER_HEIGHT_LIMIT || w > COVER_WIDTH_LIMIT)
        .then_some((COVER_WIDTH_LIMIT, COVER_HEIGHT_LIMIT))
}

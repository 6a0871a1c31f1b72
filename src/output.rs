//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Caption / layout
//!
//! ```text
//! cat.jpg 400x300
//!     Font: 21px, 30 chars/line
//!     top    001 HELLO WORLD @ (139, 10) 122x15
//!     bottom (none)
//! ```
//!
//! ## Profile resize
//!
//! ```text
//! avatar.jpg: resized to 300x225
//! cover.jpg: unchanged
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure and do no I/O.

use crate::imaging::{Band, CaptionLayout};
use crate::publish::PublishOutcome;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Display name for a path: its file name, or the whole path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format the lines of one band, padded so both bands align.
fn band_lines(layout: &CaptionLayout, band: Band) -> Vec<String> {
    let label = format!("{:<6}", band.label());
    let lines: Vec<String> = layout
        .band(band)
        .enumerate()
        .map(|(i, line)| {
            format!(
                "{}{} {} {} @ ({}, {}) {}x{}",
                indent(1),
                label,
                format_index(i + 1),
                line.text,
                line.x,
                line.y,
                line.width,
                line.height
            )
        })
        .collect();

    if lines.is_empty() {
        vec![format!("{}{} (none)", indent(1), label)]
    } else {
        lines
    }
}

/// Format a caption layout report.
pub fn format_caption_report(path: &Path, layout: &CaptionLayout) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} {}x{}",
            display_name(path),
            layout.image_width,
            layout.image_height
        ),
        format!(
            "{}Font: {}px, {} chars/line",
            indent(1),
            layout.font_size,
            layout.chars_per_line
        ),
    ];
    lines.extend(band_lines(layout, Band::Top));
    lines.extend(band_lines(layout, Band::Bottom));
    lines
}

/// Print a caption layout report to stdout.
pub fn print_caption_report(path: &Path, layout: &CaptionLayout) {
    for line in format_caption_report(path, layout) {
        println!("{}", line);
    }
}

/// Format the result of a publish run.
pub fn format_publish_outcome(path: &Path, outcome: &PublishOutcome) -> Vec<String> {
    match outcome {
        PublishOutcome::Captioned { layout } => format_caption_report(path, layout),
        PublishOutcome::Uncaptioned { reason } => vec![
            format!("{}: published without caption", display_name(path)),
            format!("{}Reason: {}", indent(1), reason),
        ],
    }
}

/// Print the result of a publish run to stdout.
pub fn print_publish_outcome(path: &Path, outcome: &PublishOutcome) {
    for line in format_publish_outcome(path, outcome) {
        println!("{}", line);
    }
}

/// Format the result of an in-place profile resize.
pub fn format_resize(path: &Path, resized: Option<(u32, u32)>) -> String {
    match resized {
        Some((w, h)) => format!("{}: resized to {}x{}", display_name(path), w, h),
        None => format!("{}: unchanged", display_name(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{PlacedLine, TextSize};

    fn layout(lines: Vec<PlacedLine>) -> CaptionLayout {
        CaptionLayout {
            image_width: 400,
            image_height: 300,
            font_size: 21,
            reference: TextSize {
                width: 13,
                height: 15,
            },
            chars_per_line: 30,
            lines,
        }
    }

    fn line(band: Band, text: &str, y: i32) -> PlacedLine {
        PlacedLine {
            band,
            text: text.into(),
            x: 139,
            y,
            width: 122,
            height: 15,
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
    }

    #[test]
    fn caption_report_with_top_only() {
        let report = format_caption_report(
            Path::new("/pic_folder/cat.jpg"),
            &layout(vec![line(Band::Top, "HELLO WORLD", 10)]),
        );

        assert_eq!(
            report,
            vec![
                "cat.jpg 400x300",
                "    Font: 21px, 30 chars/line",
                "    top    001 HELLO WORLD @ (139, 10) 122x15",
                "    bottom (none)",
            ]
        );
    }

    #[test]
    fn caption_report_numbers_lines_per_band() {
        let report = format_caption_report(
            Path::new("cat.jpg"),
            &layout(vec![
                line(Band::Top, "ONE", 10),
                line(Band::Bottom, "TWO", 255),
                line(Band::Bottom, "THREE", 270),
            ]),
        );

        assert_eq!(report[2], "    top    001 ONE @ (139, 10) 122x15");
        assert_eq!(report[3], "    bottom 001 TWO @ (139, 255) 122x15");
        assert_eq!(report[4], "    bottom 002 THREE @ (139, 270) 122x15");
    }

    #[test]
    fn uncaptioned_outcome_shows_reason() {
        let report = format_publish_outcome(
            Path::new("cat.jpg"),
            &PublishOutcome::Uncaptioned {
                reason: "Failed to load font impact.ttf: missing".into(),
            },
        );

        assert_eq!(report[0], "cat.jpg: published without caption");
        assert!(report[1].contains("impact.ttf"));
    }

    #[test]
    fn resize_lines() {
        assert_eq!(
            format_resize(Path::new("/p/avatar.jpg"), Some((300, 225))),
            "avatar.jpg: resized to 300x225"
        );
        assert_eq!(
            format_resize(Path::new("/p/cover.jpg"), None),
            "cover.jpg: unchanged"
        );
    }
}

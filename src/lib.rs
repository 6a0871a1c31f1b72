//! # branagram media
//!
//! Image work behind the branagram social blog: burning meme captions into
//! uploaded photos and fitting profile avatars and covers. Everything else
//! about posts (storage, routing, accounts) lives elsewhere and hands this
//! crate a stored file path plus a couple of strings.
//!
//! # The Meme Caption
//!
//! ```text
//! ┌────────────────────────────────┐
//! │   ONE DOES NOT SIMPLY WALK     │  top band, starts at y = 10
//! │            INTO                │
//! │                                │
//! │                                │
//! │           MORDOR               │  bottom band, ends 15px above bottom
//! └────────────────────────────────┘
//! ```
//!
//! - Font size is 7% of the image height.
//! - Wrap width is the image width divided by the width of a capital `A`,
//!   so wrapping is a character-count estimate, not exact layout.
//! - Each line is drawn four times in black, offset 2px left, up, right and
//!   down, then once in white on top.
//! - The result overwrites the photo. [`publish`] stages the work on a copy
//!   and renames it into place so a failure never leaves a damaged photo.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Caption layout and drawing, in-place resizing, the [`imaging::ImageBackend`] trait |
//! | [`publish`] | Meme post workflow: draft validation, staged write, caption failure policy |
//! | [`profile`] | Avatar and cover image fitting |
//! | [`config`] | `branagram.toml` loading, merging over defaults, validation |
//! | [`output`] | CLI report formatting |

pub mod config;
pub mod imaging;
pub mod output;
pub mod profile;
pub mod publish;

#[cfg(test)]
pub(crate) mod test_helpers;

//! Profile image fitting.
//!
//! Avatars and cover images are shrunk in place when a user saves their
//! profile. Both are plain fit-within-box resizes: aspect ratio is kept and
//! nothing is ever enlarged.
//!
//! The cover rule defaults to the historical condition (taller than 380px
//! *and* narrower than 1500px, into a 380-wide box). That condition skips
//! wide covers entirely and squeezes narrow ones into a portrait box; it is
//! kept as the default so existing covers keep their look.
//! [`CoverRule::Corrected`] opts into the banner rule instead.

use crate::config::{CoverRule, ProfileConfig};
use crate::imaging::calculations::{
    avatar_needs_resize, corrected_cover_resize, literal_cover_resize,
};
use crate::imaging::{BackendError, ImageBackend, get_dimensions, shrink_to_fit};
use std::path::Path;
use tracing::debug;

/// Shrink an avatar in place when either edge exceeds `avatar_max`.
///
/// Returns the new dimensions when the file was rewritten.
pub fn fit_avatar(
    backend: &impl ImageBackend,
    path: &Path,
    config: &ProfileConfig,
) -> Result<Option<(u32, u32)>, BackendError> {
    let dims = get_dimensions(backend, path)?;
    if !avatar_needs_resize(dims, config.avatar_max) {
        debug!("avatar {} within {}px", path.display(), config.avatar_max);
        return Ok(None);
    }
    shrink_to_fit(backend, path, (config.avatar_max, config.avatar_max))
}

/// Shrink a cover image in place according to `rule`.
///
/// Returns the new dimensions when the file was rewritten.
pub fn fit_cover(
    backend: &impl ImageBackend,
    path: &Path,
    rule: CoverRule,
) -> Result<Option<(u32, u32)>, BackendError> {
    let dims = get_dimensions(backend, path)?;
    let bounds = match rule {
        CoverRule::Literal => literal_cover_resize(dims),
        CoverRule::Corrected => corrected_cover_resize(dims),
    };
    match bounds {
        Some(bounds) => shrink_to_fit(backend, path, bounds),
        None => {
            debug!("cover {} left as is ({rule:?} rule)", path.display());
            Ok(None)
        }
    }
}

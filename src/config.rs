//! Media configuration module.
//!
//! Handles loading, validating, and merging `branagram.toml`. User files are
//! sparse: they are merged key-by-key over the stock defaults, unknown keys
//! are rejected to catch typos early, and the merged result is validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [captions]
//! font = "fonts/caption.ttf"    # Caption typeface, relative to the working dir
//! atomic_write = true           # Compose into a temp file, rename on success
//! on_failure = "abort"          # Or "publish-uncaptioned"
//!
//! [profile]
//! avatar_max = 300              # Avatar bounding box edge in pixels
//! cover_rule = "literal"        # Or "corrected"
//! ```
//!
//! ## Partial Configuration
//!
//! ```toml
//! # Only swap the typeface
//! [captions]
//! font = "/usr/share/fonts/impact.ttf"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "branagram.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Media configuration loaded from `branagram.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaConfig {
    /// Meme caption rendering and publishing.
    pub captions: CaptionsConfig,
    /// Avatar and cover image fitting.
    pub profile: ProfileConfig,
}

impl MediaConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.captions.font.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "captions.font must not be empty".into(),
            ));
        }
        if self.profile.avatar_max == 0 {
            return Err(ConfigError::Validation(
                "profile.avatar_max must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// What the publish workflow does when a caption cannot be burned in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionFailurePolicy {
    /// Reject the post.
    #[default]
    Abort,
    /// Publish with the original, uncaptioned photo.
    PublishUncaptioned,
}

/// Meme caption settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionsConfig {
    /// Typeface resource used for every caption.
    pub font: PathBuf,
    /// Compose into a sibling temp file and rename it over the photo.
    pub atomic_write: bool,
    pub on_failure: CaptionFailurePolicy,
}

impl Default for CaptionsConfig {
    fn default() -> Self {
        Self {
            font: PathBuf::from("fonts/caption.ttf"),
            atomic_write: true,
            on_failure: CaptionFailurePolicy::Abort,
        }
    }
}

/// Which rule decides whether a cover image is shrunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverRule {
    /// Taller than 380 *and* narrower than 1500, into a 380x1500 box.
    #[default]
    Literal,
    /// Taller than 380 *or* wider than 1500, into a 1500x380 banner.
    Corrected,
}

/// Profile image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Avatars larger than this square (either edge) are shrunk to fit it.
    pub avatar_max: u32,
    pub cover_rule: CoverRule,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            avatar_max: 300,
            cover_rule: CoverRule::Literal,
        }
    }
}

/// [`MediaConfig::default`] as a TOML table: the layer every user file is
/// merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(MediaConfig::default()).expect("default config must serialize")
}

/// Lay `overlay` over `base`.
///
/// Nested tables merge key by key, so a user file naming one key of a
/// section keeps the defaults for its siblings. Any other overlay value
/// replaces the base value outright.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut merged), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                let value = match merged.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, replacement) => replacement,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<MediaConfig, ConfigError> {
    let merged = overlay.into_iter().fold(stock_defaults_value(), merge_toml);
    let config: MediaConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `branagram.toml` from a directory, falling back to the stock
/// defaults when the file does not exist.
pub fn load_config(dir: &Path) -> Result<MediaConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return resolve_config(None);
    }
    load_config_file(&config_path)
}

/// Load an explicitly named config file. A missing file is an error.
pub fn load_config_file(path: &Path) -> Result<MediaConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `branagram.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# branagram media configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Meme captions
# ---------------------------------------------------------------------------
[captions]
# Typeface for caption text. A bold, condensed face reads best.
# Missing or unreadable fonts fail every caption call.
font = "fonts/caption.ttf"

# Compose into a temporary file next to the photo and rename it into place
# on success, so a failed write never leaves a half-written photo.
atomic_write = true

# What to do when a caption cannot be drawn:
#   "abort"               reject the post
#   "publish-uncaptioned" keep the original photo and publish anyway
on_failure = "abort"

# ---------------------------------------------------------------------------
# Profile images
# ---------------------------------------------------------------------------
[profile]
# Avatars with either edge above this are shrunk to fit a square of this size.
avatar_max = 300

# Cover image rule:
#   "literal"   shrink when taller than 380px and narrower than 1500px,
#               into a 380x1500 box (historical behavior)
#   "corrected" shrink when taller than 380px or wider than 1500px,
#               into a 1500x380 banner
cover_rule = "literal"
"##
}

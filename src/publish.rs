//! Meme post publishing.
//!
//! A meme post is a titled photo with top and bottom captions. Publishing
//! burns the captions into the stored photo, which is destructive, so by
//! default the work happens on a staged copy:
//!
//! ```text
//! pic_folder/cat.jpg ──copy──► pic_folder/.caption-XXXX.jpg
//!                                   │ compose_meme
//!                                   ▼
//! pic_folder/cat.jpg ◄──rename── pic_folder/.caption-XXXX.jpg
//! ```
//!
//! The rename is atomic on the same filesystem, so readers see either the
//! original photo or the finished meme. Any failure drops the staged copy
//! and leaves the original in place.

use crate::config::{CaptionFailurePolicy, CaptionsConfig};
use crate::imaging::{BackendError, CaptionLayout, ImageBackend, compose_meme, is_supported_image};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Longest accepted post title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Longest accepted caption, in characters.
pub const CAPTION_MAX_CHARS: usize = 100;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Invalid meme draft: {0}")]
    InvalidDraft(String),
    #[error("Caption failed: {0}")]
    Caption(#[from] BackendError),
}

/// A meme post as submitted, before its photo is captioned.
#[derive(Debug, Clone, PartialEq)]
pub struct MemeDraft {
    pub title: String,
    pub top: String,
    pub bottom: String,
    /// Stored upload; rewritten in place on success.
    pub photo: PathBuf,
}

impl MemeDraft {
    /// Check the field limits of a post record.
    pub fn validate(&self) -> Result<(), PublishError> {
        let title_len = self.title.trim().chars().count();
        if title_len == 0 {
            return Err(PublishError::InvalidDraft("title must not be empty".into()));
        }
        if title_len > TITLE_MAX_CHARS {
            return Err(PublishError::InvalidDraft(format!(
                "title is {title_len} characters, limit is {TITLE_MAX_CHARS}"
            )));
        }
        for (name, text) in [("top", &self.top), ("bottom", &self.bottom)] {
            let len = text.chars().count();
            if len > CAPTION_MAX_CHARS {
                return Err(PublishError::InvalidDraft(format!(
                    "{name} caption is {len} characters, limit is {CAPTION_MAX_CHARS}"
                )));
            }
        }
        if !is_supported_image(&self.photo) {
            return Err(PublishError::InvalidDraft(format!(
                "unsupported photo type: {}",
                self.photo.display()
            )));
        }
        Ok(())
    }
}

/// How a meme post went out.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    /// The photo now carries the caption.
    Captioned { layout: CaptionLayout },
    /// Captioning failed and policy allowed publishing the original photo.
    Uncaptioned { reason: String },
}

/// Caption a draft's photo according to `config`.
pub fn publish_meme(
    backend: &impl ImageBackend,
    draft: &MemeDraft,
    config: &CaptionsConfig,
) -> Result<PublishOutcome, PublishError> {
    draft.validate()?;

    let result = if config.atomic_write {
        compose_staged(backend, draft, &config.font)
    } else {
        compose_meme(backend, &draft.photo, &draft.top, &draft.bottom, &config.font)
    };

    match result {
        Ok(layout) => {
            info!(title = %draft.title, "published meme {}", draft.photo.display());
            Ok(PublishOutcome::Captioned { layout })
        }
        Err(err) if can_fall_back(&err, config) => {
            warn!(title = %draft.title, "publishing without caption: {err}");
            Ok(PublishOutcome::Uncaptioned {
                reason: err.to_string(),
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// An in-place write failure may have damaged the original, so it is never
/// published as-is.
fn can_fall_back(err: &BackendError, config: &CaptionsConfig) -> bool {
    let original_intact = config.atomic_write || !matches!(err, BackendError::ImageWrite { .. });
    config.on_failure == CaptionFailurePolicy::PublishUncaptioned && original_intact
}

/// Compose on a sibling copy of the photo, then rename it over the photo.
fn compose_staged(
    backend: &impl ImageBackend,
    draft: &MemeDraft,
    font: &Path,
) -> Result<CaptionLayout, BackendError> {
    let photo = &draft.photo;
    let load_error = |reason: String| BackendError::ImageLoad {
        path: photo.clone(),
        reason,
    };
    let write_error = |reason: String| BackendError::ImageWrite {
        path: photo.clone(),
        reason,
    };

    if !photo.is_file() {
        return Err(load_error("no such file".into()));
    }

    let dir = photo
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    // The backend picks the encoder from the extension.
    let suffix = photo
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let staged = tempfile::Builder::new()
        .prefix(".caption-")
        .suffix(&suffix)
        .tempfile_in(dir)
        .map_err(|e| write_error(e.to_string()))?
        .into_temp_path();

    fs::copy(photo, &staged).map_err(|e| load_error(e.to_string()))?;
    let permissions = fs::metadata(photo)
        .map_err(|e| load_error(e.to_string()))?
        .permissions();
    fs::set_permissions(&staged, permissions).map_err(|e| write_error(e.to_string()))?;

    let layout = compose_meme(backend, &staged, &draft.top, &draft.bottom, font)?;

    staged
        .persist(photo)
        .map_err(|e| write_error(e.error.to_string()))?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RustBackend;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::{bundled_font_path, create_test_jpeg};
    use tempfile::TempDir;

    fn draft(photo: &Path) -> MemeDraft {
        MemeDraft {
            title: "monday".into(),
            top: "me on monday".into(),
            bottom: "send help".into(),
            photo: photo.to_path_buf(),
        }
    }

    fn config(atomic_write: bool, on_failure: CaptionFailurePolicy) -> CaptionsConfig {
        CaptionsConfig {
            font: bundled_font_path(),
            atomic_write,
            on_failure,
        }
    }

    fn dir_entries(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    // =========================================================================
    // Draft validation
    // =========================================================================

    #[test]
    fn valid_draft_passes() {
        assert!(draft(Path::new("/pic_folder/cat.jpg")).validate().is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut d = draft(Path::new("/pic_folder/cat.jpg"));
        d.title = "   ".into();
        assert!(matches!(d.validate(), Err(PublishError::InvalidDraft(_))));
    }

    #[test]
    fn long_title_is_rejected() {
        let mut d = draft(Path::new("/pic_folder/cat.jpg"));
        d.title = "t".repeat(TITLE_MAX_CHARS + 1);
        assert!(matches!(d.validate(), Err(PublishError::InvalidDraft(_))));
    }

    #[test]
    fn long_caption_is_rejected() {
        let mut d = draft(Path::new("/pic_folder/cat.jpg"));
        d.bottom = "b".repeat(CAPTION_MAX_CHARS + 1);
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("bottom caption"));
    }

    #[test]
    fn caption_limit_counts_characters() {
        let mut d = draft(Path::new("/pic_folder/cat.jpg"));
        d.top = "é".repeat(CAPTION_MAX_CHARS);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn video_upload_is_rejected() {
        let d = draft(Path::new("/dox_folder/clip.mp4"));
        assert!(matches!(d.validate(), Err(PublishError::InvalidDraft(_))));
    }

    #[test]
    fn invalid_draft_never_reaches_backend() {
        let backend = MockBackend::new();
        let mut d = draft(Path::new("/pic_folder/cat.jpg"));
        d.title.clear();

        let result = publish_meme(&backend, &d, &config(false, CaptionFailurePolicy::Abort));

        assert!(result.is_err());
        assert!(backend.get_operations().is_empty());
    }

    // =========================================================================
    // In-place compositing
    // =========================================================================

    #[test]
    fn in_place_composes_on_the_photo_itself() {
        let backend = MockBackend::new();
        let d = draft(Path::new("/pic_folder/cat.jpg"));

        let outcome = publish_meme(&backend, &d, &config(false, CaptionFailurePolicy::Abort)).unwrap();

        assert!(matches!(outcome, PublishOutcome::Captioned { .. }));
        assert!(matches!(
            &backend.get_operations()[0],
            RecordedOp::Caption { path, top, .. } if path == "/pic_folder/cat.jpg" && top == "ME ON MONDAY"
        ));
    }

    #[test]
    fn in_place_write_failure_never_falls_back() {
        let backend = MockBackend::failing_caption(BackendError::ImageWrite {
            path: "/pic_folder/cat.jpg".into(),
            reason: "disk full".into(),
        });
        let d = draft(Path::new("/pic_folder/cat.jpg"));

        let result = publish_meme(
            &backend,
            &d,
            &config(false, CaptionFailurePolicy::PublishUncaptioned),
        );

        assert!(matches!(
            result,
            Err(PublishError::Caption(BackendError::ImageWrite { .. }))
        ));
    }

    #[test]
    fn in_place_font_failure_can_fall_back() {
        let backend = MockBackend::failing_caption(BackendError::FontLoad {
            path: "/fonts/impact.ttf".into(),
            reason: "missing".into(),
        });
        let d = draft(Path::new("/pic_folder/cat.jpg"));

        let outcome = publish_meme(
            &backend,
            &d,
            &config(false, CaptionFailurePolicy::PublishUncaptioned),
        )
        .unwrap();

        assert!(matches!(outcome, PublishOutcome::Uncaptioned { reason } if reason.contains("font")));
    }

    // =========================================================================
    // Staged (atomic) compositing
    // =========================================================================

    #[test]
    fn staged_compose_uses_sibling_with_same_extension() {
        let tmp = TempDir::new().unwrap();
        let photo = tmp.path().join("cat.jpg");
        create_test_jpeg(&photo, 64, 64);
        let backend = MockBackend::new();

        publish_meme(&backend, &draft(&photo), &config(true, CaptionFailurePolicy::Abort)).unwrap();

        let ops = backend.get_operations();
        let RecordedOp::Caption { path, .. } = &ops[0] else {
            panic!("expected caption op, got {ops:?}");
        };
        let staged = Path::new(path);
        assert_ne!(staged, photo);
        assert_eq!(staged.parent(), photo.parent());
        assert_eq!(staged.extension().unwrap(), "jpg");
        // Staged copy was renamed over the photo
        assert!(!staged.exists());
        assert_eq!(dir_entries(tmp.path()), 1);
    }

    #[test]
    fn staged_compose_captions_photo() {
        let tmp = TempDir::new().unwrap();
        let photo = tmp.path().join("cat.jpg");
        create_test_jpeg(&photo, 400, 300);
        let before = fs::read(&photo).unwrap();

        let outcome = publish_meme(
            &RustBackend::new(),
            &draft(&photo),
            &config(true, CaptionFailurePolicy::Abort),
        )
        .unwrap();

        let PublishOutcome::Captioned { layout } = outcome else {
            panic!("expected captioned outcome");
        };
        assert_eq!(layout.font_size, 21);
        assert_ne!(fs::read(&photo).unwrap(), before);
        assert_eq!(image::image_dimensions(&photo).unwrap(), (400, 300));
        assert_eq!(dir_entries(tmp.path()), 1);
    }

    #[test]
    fn staged_failure_leaves_original_and_no_leftovers() {
        let tmp = TempDir::new().unwrap();
        let photo = tmp.path().join("cat.jpg");
        create_test_jpeg(&photo, 200, 100);
        let before = fs::read(&photo).unwrap();
        let mut cfg = config(true, CaptionFailurePolicy::Abort);
        cfg.font = tmp.path().join("missing.ttf");

        let result = publish_meme(&RustBackend::new(), &draft(&photo), &cfg);

        assert!(matches!(
            result,
            Err(PublishError::Caption(BackendError::FontLoad { .. }))
        ));
        assert_eq!(fs::read(&photo).unwrap(), before);
        assert_eq!(dir_entries(tmp.path()), 1);
    }

    #[test]
    fn staged_failure_publishes_uncaptioned_when_allowed() {
        let tmp = TempDir::new().unwrap();
        let photo = tmp.path().join("cat.jpg");
        create_test_jpeg(&photo, 200, 100);
        let before = fs::read(&photo).unwrap();
        let mut cfg = config(true, CaptionFailurePolicy::PublishUncaptioned);
        cfg.font = tmp.path().join("missing.ttf");

        let outcome = publish_meme(&RustBackend::new(), &draft(&photo), &cfg).unwrap();

        assert!(matches!(outcome, PublishOutcome::Uncaptioned { .. }));
        assert_eq!(fs::read(&photo).unwrap(), before);
    }

    #[test]
    fn staged_missing_photo_is_load_error() {
        let tmp = TempDir::new().unwrap();
        let photo = tmp.path().join("gone.jpg");

        let result = publish_meme(
            &RustBackend::new(),
            &draft(&photo),
            &config(true, CaptionFailurePolicy::Abort),
        );

        assert!(matches!(
            result,
            Err(PublishError::Caption(BackendError::ImageLoad { .. }))
        ));
        assert_eq!(dir_entries(tmp.path()), 0);
    }

    #[cfg(unix)]
    #[test]
    fn staged_compose_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let photo = tmp.path().join("cat.png");
        crate::test_helpers::create_test_png(&photo, 100, 100);
        fs::set_permissions(&photo, fs::Permissions::from_mode(0o644)).unwrap();

        publish_meme(
            &RustBackend::new(),
            &draft(&photo),
            &config(true, CaptionFailurePolicy::Abort),
        )
        .unwrap();

        let mode = fs::metadata(&photo).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}

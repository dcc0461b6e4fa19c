//! Validation and file-name helpers for naming submissions.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// Extensions processed by batch previews when the caller gives none.
pub const DEFAULT_MEDIA_EXTENSIONS: &[&str] = &[".mkv", ".mp4", ".avi", ".m4v"];

/// Maximum length of a proposed display name, in characters.
pub const MAX_DISPLAY_NAME_LEN: usize = 255;

/// Maximum length of an author username, in characters.
pub const MAX_USERNAME_LEN: usize = 64;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a proposed display name and return it trimmed.
pub fn validate_display_name(name: &str) -> Result<&str, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("display name must not be empty".into()));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "display name must be at most {MAX_DISPLAY_NAME_LEN} characters"
        )));
    }
    if name.contains(['/', '\\']) {
        return Err(CoreError::Validation(
            "display name must not contain path separators".into(),
        ));
    }
    Ok(name)
}

/// Validate an author username and return it trimmed.
pub fn validate_username(username: &str) -> Result<&str, CoreError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(CoreError::Validation("username is required".into()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(CoreError::Validation(format!(
            "username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    Ok(username)
}

/// Validate the numeric metadata fields of a submission.
///
/// Each field is optional; `Some(0)` is a legal season or episode.
pub fn validate_metadata_numbers(
    year: Option<i32>,
    season: Option<i32>,
    episode: Option<i32>,
) -> Result<(), CoreError> {
    if let Some(year) = year {
        if year <= 0 {
            return Err(CoreError::Validation(format!(
                "year must be positive, got {year}"
            )));
        }
    }
    if let Some(season) = season {
        if season < 0 {
            return Err(CoreError::Validation(format!(
                "season must not be negative, got {season}"
            )));
        }
    }
    if let Some(episode) = episode {
        if episode < 0 {
            return Err(CoreError::Validation(format!(
                "episode must not be negative, got {episode}"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// File names
// ---------------------------------------------------------------------------

/// Whether `path` has one of `extensions` (with leading dot, case-insensitive).
pub fn is_media_file<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let Some(ext) = path.extension().and_then(OsStr::to_str) else {
        return false;
    };
    let ext = format!(".{}", ext.to_lowercase());
    extensions
        .iter()
        .any(|allowed| allowed.as_ref().to_lowercase() == ext)
}

/// Target path for renaming `original` to `proposed`.
///
/// The new file stays in the original directory and keeps the original
/// extension. A proposed name ending in a different media extension has
/// that extension replaced; any other name gets the original extension
/// appended (so "Mr. Robot S01E01" is not cut at its first dot).
pub fn apply_original_extension(original: &Path, proposed: &str) -> PathBuf {
    let dir = original.parent().unwrap_or_else(|| Path::new(""));
    let Some(ext) = original.extension().and_then(OsStr::to_str) else {
        return dir.join(proposed);
    };

    let suffix = format!(".{ext}");
    if proposed.to_lowercase().ends_with(&suffix.to_lowercase()) {
        return dir.join(proposed);
    }

    let proposed_path = Path::new(proposed);
    let base = if is_media_file(proposed_path, DEFAULT_MEDIA_EXTENSIONS) {
        proposed_path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or(proposed)
    } else {
        proposed
    };

    dir.join(format!("{base}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_is_trimmed() {
        assert_eq!(
            validate_display_name("  The Matrix (1999).mkv ").unwrap(),
            "The Matrix (1999).mkv"
        );
    }

    #[test]
    fn display_name_rejects_empty_and_separators() {
        assert!(validate_display_name("   ").is_err());
        assert!(validate_display_name("../evil.mkv").is_err());
        assert!(validate_display_name(&"a".repeat(MAX_DISPLAY_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn username_required() {
        assert!(validate_username("").is_err());
        assert_eq!(validate_username(" neo ").unwrap(), "neo");
    }

    #[test]
    fn metadata_numbers_allow_zero_seasons() {
        assert!(validate_metadata_numbers(Some(1999), Some(0), Some(0)).is_ok());
        assert!(validate_metadata_numbers(None, None, None).is_ok());
        assert!(validate_metadata_numbers(Some(0), None, None).is_err());
        assert!(validate_metadata_numbers(None, Some(-1), None).is_err());
        assert!(validate_metadata_numbers(None, None, Some(-2)).is_err());
    }

    #[test]
    fn media_file_detection_is_case_insensitive() {
        assert!(is_media_file(Path::new("/m/Movie.MKV"), DEFAULT_MEDIA_EXTENSIONS));
        assert!(is_media_file(Path::new("clip.mp4"), &[".MP4"]));
        assert!(!is_media_file(Path::new("notes.txt"), DEFAULT_MEDIA_EXTENSIONS));
        assert!(!is_media_file(Path::new("README"), DEFAULT_MEDIA_EXTENSIONS));
    }

    #[test]
    fn keeps_original_extension() {
        assert_eq!(
            apply_original_extension(Path::new("/media/abc123.mkv"), "The Matrix (1999).mp4"),
            PathBuf::from("/media/The Matrix (1999).mkv")
        );
        assert_eq!(
            apply_original_extension(Path::new("/media/abc123.mkv"), "Heat (1995)"),
            PathBuf::from("/media/Heat (1995).mkv")
        );
    }

    #[test]
    fn dots_inside_names_are_not_extensions() {
        assert_eq!(
            apply_original_extension(Path::new("/tv/x.mkv"), "Mr. Robot S01E01"),
            PathBuf::from("/tv/Mr. Robot S01E01.mkv")
        );
    }

    #[test]
    fn matching_extension_is_left_alone() {
        assert_eq!(
            apply_original_extension(Path::new("rel/x.mkv"), "Alien (1979).mkv"),
            PathBuf::from("rel/Alien (1979).mkv")
        );
    }
}

//! Note constants and field validators.

use std::borrow::Cow;

use validator::ValidationError;

use crate::patch::Patch;

/// Title given to notes created without one.
pub const DEFAULT_NOTE_TITLE: &str = "Unbenannt";

/// Maximum length of a note title in characters.
pub const MAX_NOTE_TITLE_LENGTH: usize = 500;

/// Serde default for `title` on create and sync.
pub fn default_note_title() -> String {
    DEFAULT_NOTE_TITLE.to_string()
}

/// Titles may be empty but must fit in [`MAX_NOTE_TITLE_LENGTH`] characters.
pub fn validate_note_title(title: &str) -> Result<(), ValidationError> {
    if title.chars().count() > MAX_NOTE_TITLE_LENGTH {
        return Err(ValidationError::new("length").with_message(Cow::Owned(format!(
            "Note title must not exceed {MAX_NOTE_TITLE_LENGTH} characters"
        ))));
    }
    Ok(())
}

pub fn validate_note_title_patch(title: &Patch<String>) -> Result<(), ValidationError> {
    title.validate_non_null(|v| validate_note_title(v))
}

/// Content is free-form markup; only an explicit `null` is refused.
pub fn validate_note_content_patch(content: &Patch<String>) -> Result<(), ValidationError> {
    content.validate_non_null(|_| Ok(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_default_titles_accepted() {
        assert!(validate_note_title("").is_ok());
        assert!(validate_note_title(DEFAULT_NOTE_TITLE).is_ok());
    }

    #[test]
    fn overlong_title_rejected() {
        let title = "t".repeat(MAX_NOTE_TITLE_LENGTH + 1);
        assert_eq!(validate_note_title(&title).unwrap_err().code, "length");
    }

    #[test]
    fn content_patch_allows_empty_but_not_null() {
        assert!(validate_note_content_patch(&Patch::Value(String::new())).is_ok());
        assert!(validate_note_content_patch(&Patch::Unset).is_ok());
        assert!(validate_note_content_patch(&Patch::Null).is_err());
    }
}

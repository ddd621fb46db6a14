//! Folder constants and field validators.
//!
//! The validators return [`ValidationError`] so they can be plugged straight
//! into `#[validate(custom(function = ...))]` on request DTOs.

use std::borrow::Cow;

use validator::ValidationError;

use crate::patch::Patch;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Icon assigned to folders created without one.
pub const DEFAULT_FOLDER_ICON: &str = "📁";

/// Maximum length of a folder name in characters.
pub const MAX_FOLDER_NAME_LENGTH: usize = 255;

/// Maximum length of a folder icon in characters.
pub const MAX_FOLDER_ICON_LENGTH: usize = 10;

/// Serde default for `icon` on create.
pub fn default_folder_icon() -> String {
    DEFAULT_FOLDER_ICON.to_string()
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// A folder name must contain something other than whitespace and fit in
/// [`MAX_FOLDER_NAME_LENGTH`] characters.
pub fn validate_folder_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("Folder name must not be empty")));
    }
    if name.chars().count() > MAX_FOLDER_NAME_LENGTH {
        return Err(ValidationError::new("length").with_message(Cow::Owned(format!(
            "Folder name must not exceed {MAX_FOLDER_NAME_LENGTH} characters"
        ))));
    }
    Ok(())
}

/// An icon is a short label (usually a single emoji).
pub fn validate_folder_icon(icon: &str) -> Result<(), ValidationError> {
    let len = icon.chars().count();
    if len == 0 || len > MAX_FOLDER_ICON_LENGTH {
        return Err(ValidationError::new("length").with_message(Cow::Owned(format!(
            "Folder icon must be between 1 and {MAX_FOLDER_ICON_LENGTH} characters"
        ))));
    }
    Ok(())
}

pub fn validate_folder_name_patch(name: &Patch<String>) -> Result<(), ValidationError> {
    name.validate_non_null(|v| validate_folder_name(v))
}

pub fn validate_folder_icon_patch(icon: &Patch<String>) -> Result<(), ValidationError> {
    icon.validate_non_null(|v| validate_folder_icon(v))
}

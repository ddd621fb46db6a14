//! Note model.

use mynotes_core::notes::{
    default_note_title, validate_note_content_patch, validate_note_title,
    validate_note_title_patch,
};
use mynotes_core::patch::Patch;
use mynotes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `notes` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    /// Free-form markup as produced by the editor.
    pub content: String,
    pub folder_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub is_deleted: bool,
}

/// DTO for creating a note. Also the element type of a sync batch.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNote {
    #[serde(default = "default_note_title")]
    #[validate(custom(function = "validate_note_title"))]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub folder_id: Option<DbId>,
}

/// DTO for partially updating a note. `"folder_id": null` unfiles it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateNote {
    #[serde(default)]
    #[validate(custom(function = "validate_note_title_patch"))]
    pub title: Patch<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_note_content_patch"))]
    pub content: Patch<String>,
    #[serde(default)]
    pub folder_id: Patch<DbId>,
}

/// Query parameters for `GET /notes`.
#[derive(Debug, Default, Deserialize)]
pub struct NoteListParams {
    pub folder_id: Option<DbId>,
}

//! Folder model.

use mynotes_core::folder_tree::FolderNode;
use mynotes_core::folders::{
    default_folder_icon, validate_folder_icon, validate_folder_icon_patch, validate_folder_name,
    validate_folder_name_patch,
};
use mynotes_core::patch::Patch;
use mynotes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `folders` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Folder {
    pub id: DbId,
    pub name: String,
    pub icon: String,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    /// `None` until the first update.
    pub updated_at: Option<Timestamp>,
}

impl FolderNode for Folder {
    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }
}

/// Just the hierarchy columns, for planning recursive deletes.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct FolderLink {
    pub id: DbId,
    pub parent_id: Option<DbId>,
}

impl FolderNode for FolderLink {
    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }
}

/// A folder as returned by the API, with its descendants nested inline.
#[derive(Debug, Clone, Serialize)]
pub struct FolderWithSubfolders {
    #[serde(flatten)]
    pub folder: Folder,
    pub subfolders: Vec<FolderWithSubfolders>,
}

impl FolderWithSubfolders {
    /// Builder passed to `FolderTree::nest`.
    pub fn assemble(folder: &Folder, subfolders: Vec<Self>) -> Self {
        Self {
            folder: folder.clone(),
            subfolders,
        }
    }
}

/// DTO for creating a new folder.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFolder {
    #[validate(custom(function = "validate_folder_name"))]
    pub name: String,
    #[serde(default = "default_folder_icon")]
    #[validate(custom(function = "validate_folder_icon"))]
    pub icon: String,
    #[serde(default)]
    pub parent_id: Option<DbId>,
}

/// DTO for partially updating a folder. Absent fields are left untouched;
/// `"parent_id": null` moves the folder to the top level.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateFolder {
    #[serde(default)]
    #[validate(custom(function = "validate_folder_name_patch"))]
    pub name: Patch<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_folder_icon_patch"))]
    pub icon: Patch<String>,
    #[serde(default)]
    pub parent_id: Patch<DbId>,
}

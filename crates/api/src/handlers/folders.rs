//! Handlers for the `/folders` resource.

use axum::extract::State;
use axum::Json;

use mynotes_core::error::CoreError;
use mynotes_core::folder_tree::FolderTree;
use mynotes_core::types::DbId;
use mynotes_db::models::folder::{CreateFolder, FolderWithSubfolders, UpdateFolder};
use mynotes_db::repositories::FolderRepo;

use crate::error::AppResult;
use crate::extract::{AppPath, ValidatedJson};
use crate::response::MessageResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Folder",
        id,
    }
}

/// GET /folders
///
/// List top-level folders with their subfolders nested inline.
pub async fn list_folders(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FolderWithSubfolders>>> {
    let folders = FolderRepo::list_top_level_tree(&state.pool).await?;
    Ok(Json(folders))
}

/// GET /folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<FolderWithSubfolders>> {
    let folder = FolderRepo::find_tree(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(folder))
}

/// POST /folders
pub async fn create_folder(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateFolder>,
) -> AppResult<Json<FolderWithSubfolders>> {
    let folder = FolderRepo::create(&state.pool, &input).await?;

    tracing::info!(
        folder_id = folder.id,
        parent_id = ?folder.parent_id,
        "Folder created"
    );

    Ok(Json(FolderWithSubfolders::assemble(&folder, Vec::new())))
}

/// PUT /folders/{id}
///
/// Apply a partial update. Absent fields are untouched; `"parent_id": null`
/// moves the folder to the top level.
pub async fn update_folder(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateFolder>,
) -> AppResult<Json<FolderWithSubfolders>> {
    let folder = FolderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(folder_id = id, "Folder updated");

    let node = FolderRepo::find_tree(&state.pool, id)
        .await?
        .unwrap_or_else(|| FolderWithSubfolders::assemble(&folder, Vec::new()));
    Ok(Json(node))
}

/// DELETE /folders/{id}
///
/// Delete the folder and every descendant, children before parents. The
/// whole plan is computed up front, so a looping `parent_id` chain is
/// refused before any row is touched. Deletions then commit one by one.
pub async fn delete_folder(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let tree = FolderTree::build(FolderRepo::list_links(&state.pool).await?);
    let plan = tree.deletion_order(id)?;

    let removed = FolderRepo::delete_in_order(&state.pool, &plan).await?;

    tracing::info!(folder_id = id, removed, "Folder tree deleted");

    Ok(Json(MessageResponse {
        message: "Folder deleted successfully",
    }))
}

//! Handlers for the `/notes` resource.
//!
//! Soft-deleted notes behave as if they did not exist on every endpoint.

use axum::extract::State;
use axum::Json;
use validator::Validate;

use mynotes_core::error::CoreError;
use mynotes_core::types::DbId;
use mynotes_db::models::note::{CreateNote, Note, NoteListParams, UpdateNote};
use mynotes_db::repositories::NoteRepo;

use crate::error::{field_errors, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery, ValidatedJson};
use crate::response::MessageResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Note", id }
}

/// GET /notes?folder_id=
///
/// List live notes, optionally only those filed under `folder_id`.
pub async fn list_notes(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<NoteListParams>,
) -> AppResult<Json<Vec<Note>>> {
    let notes = NoteRepo::list(&state.pool, params.folder_id).await?;
    Ok(Json(notes))
}

/// GET /notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Note>> {
    let note = NoteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(note))
}

/// POST /notes
pub async fn create_note(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateNote>,
) -> AppResult<Json<Note>> {
    let note = NoteRepo::create(&state.pool, &input).await?;

    tracing::info!(note_id = note.id, folder_id = ?note.folder_id, "Note created");

    Ok(Json(note))
}

/// PUT /notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateNote>,
) -> AppResult<Json<Note>> {
    let note = NoteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(note_id = id, "Note updated");

    Ok(Json(note))
}

/// DELETE /notes/{id}
///
/// Soft delete: the row stays, flagged `is_deleted`.
pub async fn delete_note(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !NoteRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id).into());
    }

    tracing::info!(note_id = id, "Note soft-deleted");

    Ok(Json(MessageResponse {
        message: "Note deleted successfully",
    }))
}

/// POST /notes/sync
///
/// Upsert each note keyed on `(title, folder_id)`, in request order. The
/// whole batch is validated before anything is written.
pub async fn sync_notes(
    State(state): State<AppState>,
    AppJson(inputs): AppJson<Vec<CreateNote>>,
) -> AppResult<Json<Vec<Note>>> {
    let invalid: Vec<_> = inputs
        .iter()
        .enumerate()
        .filter_map(|(i, input)| input.validate().err().map(|e| field_errors(&e, &format!("[{i}]."))))
        .flatten()
        .collect();
    if !invalid.is_empty() {
        return Err(CoreError::InvalidFields(invalid).into());
    }

    let notes = NoteRepo::sync(&state.pool, &inputs).await?;

    tracing::info!(requested = inputs.len(), synced = notes.len(), "Notes synced");

    Ok(Json(notes))
}

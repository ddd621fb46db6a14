//! Repository for the `notes` table.
//!
//! Soft-deleted notes (`is_deleted = TRUE`) are invisible to every read and
//! write here except the raw row itself; there is no hard delete.

use std::collections::HashMap;

use mynotes_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::{CreateNote, Note, UpdateNote};

/// Column list for notes queries.
const COLUMNS: &str = "id, title, content, folder_id, created_at, updated_at, is_deleted";

/// Provides CRUD, soft delete, and sync for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Create a new note, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNote) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (title, content, folder_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.folder_id)
            .fetch_one(pool)
            .await
    }

    /// Find a live note by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1 AND NOT is_deleted");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live notes, optionally restricted to one folder.
    pub async fn list(pool: &PgPool, folder_id: Option<DbId>) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE NOT is_deleted AND ($1::BIGINT IS NULL OR folder_id = $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(folder_id)
            .fetch_all(pool)
            .await
    }

    /// Update a live note, applying only the fields present in `input`.
    ///
    /// Returns `None` if the note does not exist or is soft-deleted.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                folder_id = CASE WHEN $4 THEN $5 ELSE folder_id END,
                updated_at = NOW()
             WHERE id = $1 AND NOT is_deleted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(input.title.value())
            .bind(input.content.value())
            .bind(input.folder_id.is_set())
            .bind(input.folder_id.value().copied())
            .fetch_optional(pool)
            .await
    }

    /// Flag a live note as deleted. Returns `true` if a row was flagged.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notes SET is_deleted = TRUE, updated_at = NOW()
             WHERE id = $1 AND NOT is_deleted",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Upsert a single note keyed on `(title, folder_id)` among live notes.
    ///
    /// If a live note with exactly this title in exactly this folder exists
    /// (oldest first when several match), its fields are overwritten and
    /// `updated_at` refreshed; otherwise a new note is inserted. The lookup
    /// and the write share one transaction. Returns the resulting row and
    /// whether it was newly created.
    ///
    /// `FOR UPDATE` only locks a row that already exists. Two concurrent
    /// calls for a `(title, folder_id)` with no live match both insert, and
    /// the store ends up with two notes under that key. The partial index on
    /// `(title, folder_id)` speeds up the lookup but is not unique.
    pub async fn upsert_by_title(
        pool: &PgPool,
        input: &CreateNote,
    ) -> Result<(Note, bool), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM notes
             WHERE title = $1 AND folder_id IS NOT DISTINCT FROM $2 AND NOT is_deleted
             ORDER BY id
             LIMIT 1
             FOR UPDATE",
        )
        .bind(&input.title)
        .bind(input.folder_id)
        .fetch_optional(&mut *tx)
        .await?;

        let result = match existing {
            Some((id,)) => {
                let query = format!(
                    "UPDATE notes SET title = $2, content = $3, folder_id = $4, updated_at = NOW()
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                let note = sqlx::query_as::<_, Note>(&query)
                    .bind(id)
                    .bind(&input.title)
                    .bind(&input.content)
                    .bind(input.folder_id)
                    .fetch_one(&mut *tx)
                    .await?;
                (note, false)
            }
            None => {
                let query = format!(
                    "INSERT INTO notes (title, content, folder_id)
                     VALUES ($1, $2, $3)
                     RETURNING {COLUMNS}"
                );
                let note = sqlx::query_as::<_, Note>(&query)
                    .bind(&input.title)
                    .bind(&input.content)
                    .bind(input.folder_id)
                    .fetch_one(&mut *tx)
                    .await?;
                (note, true)
            }
        };

        tx.commit().await?;
        Ok(result)
    }

    /// Upsert each input in order (see [`NoteRepo::upsert_by_title`]).
    ///
    /// Each item commits on its own; a failure stops the batch with earlier
    /// items already applied. Results are returned in input order. A title
    /// repeated within the batch resolves to the same note each time, and
    /// every occurrence reports that note's final state.
    pub async fn sync(pool: &PgPool, inputs: &[CreateNote]) -> Result<Vec<Note>, sqlx::Error> {
        let mut synced = Vec::with_capacity(inputs.len());
        for input in inputs {
            let (note, created) = Self::upsert_by_title(pool, input).await?;
            tracing::debug!(note_id = note.id, created, "Note synced");
            synced.push(note);
        }

        let latest: HashMap<DbId, Note> = synced.iter().map(|n| (n.id, n.clone())).collect();
        Ok(synced
            .into_iter()
            .map(|n| latest.get(&n.id).cloned().unwrap_or(n))
            .collect())
    }
}

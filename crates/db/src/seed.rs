//! Sample data for a fresh installation.

use mynotes_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

/// Top-level folders: `(name, icon)`.
const TOP_LEVEL: &[(&str, &str)] = &[("Persönlich", "👤"), ("Arbeit", "💼"), ("Projekte", "🚀")];

/// Subfolders: `(name, icon, index into TOP_LEVEL)`.
const SUBFOLDERS: &[(&str, &str, usize)] = &[
    ("Tagebuch", "📖", 0),
    ("Ideen", "💡", 0),
    ("Meetings", "🤝", 1),
];

const WELCOME_TITLE: &str = "Willkommen bei MyNotes!";
const WELCOME_CONTENT: &str =
    "<p>Das ist deine erste Notiz. Du kannst sie bearbeiten oder löschen.</p>";

/// Insert the sample folders and welcome note if the store has no folders.
///
/// Runs in one transaction. Returns `true` if data was inserted, `false`
/// if folders already existed.
pub async fn seed_sample_data(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM folders")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tracing::info!(existing, "Sample data skipped, folders already present");
        return Ok(false);
    }

    let mut top_ids = Vec::with_capacity(TOP_LEVEL.len());
    for &(name, icon) in TOP_LEVEL {
        top_ids.push(insert_folder(&mut tx, name, icon, None).await?);
    }
    for &(name, icon, parent) in SUBFOLDERS {
        insert_folder(&mut tx, name, icon, Some(top_ids[parent])).await?;
    }

    sqlx::query("INSERT INTO notes (title, content, folder_id) VALUES ($1, $2, $3)")
        .bind(WELCOME_TITLE)
        .bind(WELCOME_CONTENT)
        .bind(top_ids[0])
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!(
        folders = TOP_LEVEL.len() + SUBFOLDERS.len(),
        notes = 1,
        "Sample data inserted"
    );
    Ok(true)
}

async fn insert_folder(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    icon: &str,
    parent_id: Option<DbId>,
) -> Result<DbId, sqlx::Error> {
    let (id,): (DbId,) =
        sqlx::query_as("INSERT INTO folders (name, icon, parent_id) VALUES ($1, $2, $3) RETURNING id")
            .bind(name)
            .bind(icon)
            .bind(parent_id)
            .fetch_one(&mut **tx)
            .await?;
    Ok(id)
}

//! Repository for the `folders` table.

use mynotes_core::folder_tree::FolderTree;
use mynotes_core::types::DbId;
use sqlx::PgPool;

use crate::models::folder::{CreateFolder, Folder, FolderLink, FolderWithSubfolders, UpdateFolder};

/// Column list for folders queries.
const COLUMNS: &str = "id, name, icon, parent_id, created_at, updated_at";

/// Provides CRUD operations for folders.
pub struct FolderRepo;

impl FolderRepo {
    /// Create a new folder, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFolder) -> Result<Folder, sqlx::Error> {
        let query = format!(
            "INSERT INTO folders (name, icon, parent_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Folder>(&query)
            .bind(&input.name)
            .bind(&input.icon)
            .bind(input.parent_id)
            .fetch_one(pool)
            .await
    }

    /// List every folder, flat.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Folder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM folders ORDER BY id");
        sqlx::query_as::<_, Folder>(&query).fetch_all(pool).await
    }

    /// List the `(id, parent_id)` pairs of every folder.
    pub async fn list_links(pool: &PgPool) -> Result<Vec<FolderLink>, sqlx::Error> {
        sqlx::query_as::<_, FolderLink>("SELECT id, parent_id FROM folders")
            .fetch_all(pool)
            .await
    }

    /// Top-level folders with all descendants nested under `subfolders`.
    ///
    /// Loads the whole table once and assembles the hierarchy in memory.
    pub async fn list_top_level_tree(
        pool: &PgPool,
    ) -> Result<Vec<FolderWithSubfolders>, sqlx::Error> {
        let tree = FolderTree::build(Self::list_all(pool).await?);
        Ok(tree.nest_roots(&FolderWithSubfolders::assemble))
    }

    /// A single folder with all descendants nested under `subfolders`.
    pub async fn find_tree(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FolderWithSubfolders>, sqlx::Error> {
        let tree = FolderTree::build(Self::list_all(pool).await?);
        Ok(tree.nest(id, &FolderWithSubfolders::assemble))
    }

    /// Update a folder, applying only the fields present in `input`.
    ///
    /// `name` and `icon` use `COALESCE`; `parent_id` carries a presence flag
    /// so an explicit `null` clears it. Always stamps `updated_at`.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFolder,
    ) -> Result<Option<Folder>, sqlx::Error> {
        let query = format!(
            "UPDATE folders SET
                name = COALESCE($2, name),
                icon = COALESCE($3, icon),
                parent_id = CASE WHEN $4 THEN $5 ELSE parent_id END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Folder>(&query)
            .bind(id)
            .bind(input.name.value())
            .bind(input.icon.value())
            .bind(input.parent_id.is_set())
            .bind(input.parent_id.value().copied())
            .fetch_optional(pool)
            .await
    }

    /// Delete folders one at a time in the given order.
    ///
    /// Each `DELETE` commits on its own, so an error part-way through leaves
    /// the earlier deletions in place. Callers pass a children-first order
    /// from `FolderTree::deletion_order`. Returns the number of rows removed.
    pub async fn delete_in_order(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let mut removed = 0;
        for &id in ids {
            let result = sqlx::query("DELETE FROM folders WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
            tracing::debug!(folder_id = id, rows = result.rows_affected(), "Folder row deleted");
            removed += result.rows_affected();
        }
        Ok(removed)
    }
}

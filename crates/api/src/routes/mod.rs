pub mod folders;
pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /folders                 list (top-level, nested), create
/// /folders/{id}            get, update, delete (recursive)
///
/// /notes                   list (?folder_id=), create
/// /notes/{id}              get, update, delete (soft)
/// /notes/sync              upsert batch by title + folder (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/folders", folders::router())
        .nest("/notes", notes::router())
}

//! Route definitions for folders.

use axum::routing::get;
use axum::Router;

use crate::handlers::folders;
use crate::state::AppState;

/// Folder routes mounted at `/folders`.
///
/// ```text
/// GET    /        -> list_folders
/// POST   /        -> create_folder
/// GET    /{id}    -> get_folder
/// PUT    /{id}    -> update_folder
/// DELETE /{id}    -> delete_folder
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(folders::list_folders).post(folders::create_folder))
        .route(
            "/{id}",
            get(folders::get_folder)
                .put(folders::update_folder)
                .delete(folders::delete_folder),
        )
}

//! Request handlers for folders and notes.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `mynotes_db`, run
//! pure hierarchy logic from `mynotes_core`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod folders;
pub mod notes;

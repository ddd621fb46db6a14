//! Domain types and pure logic for the MyNotes backend.
//!
//! Nothing in this crate performs I/O: the persistence layer lives in
//! `mynotes-db` and the HTTP surface in `mynotes-api`.

pub mod error;
pub mod folder_tree;
pub mod folders;
pub mod notes;
pub mod patch;
pub mod types;

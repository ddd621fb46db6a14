//! Row structs and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO built from `Patch` fields

pub mod folder;
pub mod note;

use serde::Serialize;

use crate::types::DbId;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed on {} field(s)", .0.len())]
    InvalidFields(Vec<FieldError>),

    /// The stored data violates a structural invariant (e.g. a `parent_id`
    /// chain that loops back on itself).
    #[error("Integrity violation: {0}")]
    Integrity(String),
}


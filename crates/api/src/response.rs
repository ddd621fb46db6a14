//! Shared response body types for API handlers.

use serde::Serialize;

/// `{ "message": ... }` body used by delete and liveness endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

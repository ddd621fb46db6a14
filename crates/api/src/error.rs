use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mynotes_core::error::{CoreError, FieldError};
use serde::Serialize;
use validator::ValidationErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mynotes_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body could not be read as the expected JSON shape.
    #[error(transparent)]
    Json(#[from] JsonRejection),

    /// The query string could not be parsed.
    #[error(transparent)]
    Query(#[from] QueryRejection),

    /// A path parameter could not be parsed.
    #[error(transparent)]
    Path(#[from] PathRejection),

    /// The body parsed but failed field validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<FieldError>,
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";
const INTEGRITY_MESSAGE: &str = "The request conflicts with stored data";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                    Vec::new(),
                ),
                CoreError::InvalidFields(fields) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    "Request validation failed".to_string(),
                    fields,
                ),
                CoreError::Integrity(msg) => {
                    tracing::error!(error = %msg, "Integrity violation");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTEGRITY_ERROR",
                        msg,
                        Vec::new(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => {
                let (status, code, message) = classify_sqlx_error(&err);
                (status, code, message, Vec::new())
            }

            // --- Request parsing errors ---
            AppError::Json(rejection) => {
                let status = rejection.status();
                let message = rejection.body_text();
                if status == StatusCode::UNPROCESSABLE_ENTITY {
                    let details = vec![FieldError::new(
                        field_from_serde_message(&message).unwrap_or_else(|| "body".to_string()),
                        message.clone(),
                    )];
                    (status, "VALIDATION_ERROR", message, details)
                } else {
                    (status, "BAD_REQUEST", message, Vec::new())
                }
            }
            AppError::Query(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                rejection.body_text(),
                Vec::new(),
            ),
            AppError::Path(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                rejection.body_text(),
                Vec::new(),
            ),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                "Request validation failed".to_string(),
                field_errors(&errors, ""),
            ),
        };

        let body = ErrorBody {
            error: message,
            code,
            details,
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Flatten `validator` output into field-level details, sorted by field.
///
/// `prefix` is prepended to each field name (e.g. `"[2]."` for the third
/// element of a batch).
pub fn field_errors(errors: &ValidationErrors, prefix: &str) -> Vec<FieldError> {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = format!("{prefix}{field}");
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

/// Best-effort field name from a serde deserialization message.
///
/// Recognizes ``missing field `name` `` and the `path: message` form that
/// axum produces for type mismatches (e.g. `parent_id: invalid type: ...`).
fn field_from_serde_message(message: &str) -> Option<String> {
    if let Some(rest) = message.split("missing field `").nth(1) {
        return rest.split('`').next().map(str::to_string);
    }
    let inner = message.rsplit("target type: ").next()?;
    let (path, _) = inner.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then(|| path.to_string())
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Integrity constraint violations (SQLSTATE class `23`, e.g. a
///   `parent_id` or `folder_id` pointing at a missing folder) map to 500
///   with an `INTEGRITY_ERROR` code.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c.starts_with("23")) => {
            tracing::error!(
                error = %db_err,
                constraint = db_err.constraint().unwrap_or("unknown"),
                "Integrity constraint violation"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTEGRITY_ERROR",
                INTEGRITY_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}

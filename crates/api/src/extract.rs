//! Request extractors that report failures through [`AppError`].
//!
//! Axum's stock extractors answer malformed input with plain-text bodies.
//! These wrappers keep the JSON error envelope for every rejection.

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::Json;
use validator::Validate;

use crate::error::AppError;

/// `Json<T>` with JSON error responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Query<T>` with JSON error responses.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// `Path<T>` with JSON error responses.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// JSON body that must also pass `validator` checks before the handler runs.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: Validate,
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

use axum::{
    extract::{FromRequestParts, Path, rejection::PathRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A `Path<T>` wrapper that answers unparsable segments with the 404 page.
///
/// `/project/abc` and an id too large for the column match no row, so they
/// are reported like any other missing record.
#[derive(Debug)]
pub struct AppPath<T>(pub T);

impl<S, T> FromRequestParts<S> for AppPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e.body_text(), "Unmatched path parameter");
                AppError::NotFound("Not found".into())
            })?;
        Ok(AppPath(value))
    }
}

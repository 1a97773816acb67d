//! Validated JSON extractor - deserializes, normalizes, then validates.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::domain::Normalize;
use crate::errors::AppError;

/// JSON extractor that normalizes the payload before validating it,
/// so required-field checks see trimmed values.
///
/// Validation failures surface as a 400 with a field -> messages map.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Normalize + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        value.normalize();
        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

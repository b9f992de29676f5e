use crate::error::CatalogError;
use crate::pipe::Pipe;
use crate::pipe::builtins::{ParseIntPipe, ValidationPipe};
use crate::pipe::Validate;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Axum extractor for validated JSON bodies
///
/// Deserializes the body and runs it through `ValidationPipe` before the
/// handler sees it. Malformed JSON and rule violations both reject with a
/// `CatalogError::Validation`, so clients always get a 400 with field detail.
///
/// # Example
/// ```ignore
/// async fn create(ValidJson(product): ValidJson<Product>) -> Result<Json<Product>> {
///     // `product` already passed its validation rules
/// }
/// ```
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send + 'static,
{
    type Rejection = CatalogError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| CatalogError::validation("body", rejection.body_text()))?;

        let value = ValidationPipe::<T>::default().transform(value).await?;
        Ok(ValidJson(value))
    }
}

/// Axum extractor for an integer `{id}` path segment, parsed by `ParseIntPipe`.
pub struct IdParam(pub i32);

impl<S> FromRequestParts<S> for IdParam
where
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| CatalogError::validation("id", rejection.body_text()))?;

        let id = ParseIntPipe.transform(raw).await?;
        Ok(IdParam(id))
    }
}

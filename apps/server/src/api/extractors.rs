//! Custom Axum extractors for the resource endpoints.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use validator::Validate;

use crate::Error;

#[derive(Debug, Deserialize)]
struct FieldsQuery {
    #[serde(default)]
    fields: String,
}

/// The raw `fields` query parameter. A missing parameter yields an empty
/// string, which the projection engine rejects like any empty list.
#[derive(Debug, Clone)]
pub struct Fields(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for Fields
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<FieldsQuery>::try_from_uri(&parts.uri)
            .map_err(|e| Error::InvalidInput(format!("invalid query string: {}", e.body_text())))?;
        Ok(Fields(query.fields))
    }
}

/// JSON body that must also pass its `validator` rules. Any failure
/// (wrong content type, bad JSON, missing or invalid fields) is reported
/// as `INVALID_INPUT`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(reason = %e.body_text(), "Rejected request body");
            invalid_body()
        })?;

        value.validate().map_err(|e| {
            tracing::debug!(reason = %e, "Request body failed validation");
            invalid_body()
        })?;

        Ok(JsonBody(value))
    }
}

fn invalid_body() -> Error {
    Error::InvalidInput("invalid request body".to_string())
}

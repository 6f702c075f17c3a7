//! Request extractors shared by the service routers.

use crate::error::AppError;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use axum::extract::rejection::JsonRejection;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// JSON body that must also pass `validator` rules.
///
/// Malformed JSON is a `400`. Well-formed JSON that does not fit `T`
/// (unknown enum value, wrong type, missing field) and rule violations are
/// `422`.
pub struct ValidatedJson<T>(pub T);

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let mut error = ValidationError::new("invalid_body");
            error.message = Some(Cow::Owned(err.body_text()));
            let mut errors = ValidationErrors::new();
            errors.add("body", error);
            AppError::ValidationError(errors)
        }
        other => AppError::BadRequest(anyhow::anyhow!("Invalid JSON body: {}", other.body_text())),
    }
}

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// Query string extractor whose rejection is a JSON `400`.
pub struct QueryParams<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid query string: {}", e.body_text())))?;
        Ok(QueryParams(value))
    }
}

/// Resolved `limit`/`offset` pair for list routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: u64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 500;

    pub fn new(limit: Option<i64>, offset: Option<u64>) -> Self {
        Self {
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }

    pub fn limit_usize(&self) -> usize {
        self.limit as usize
    }

    pub fn offset_usize(&self) -> usize {
        usize::try_from(self.offset).unwrap_or(usize::MAX)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// `validator` rule for body fields: whitespace-only text is rejected like
/// an empty string.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::Borrowed("must not be blank"));
        return Err(error);
    }
    Ok(())
}

/// Trims `value`, rejecting it when nothing is left. Used for query
/// parameters, where a blank value is a `400`.
pub fn non_blank(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "'{}' must not be blank",
            field
        )));
    }
    Ok(trimmed.to_string())
}

/// Like [`non_blank`] for optional fields; blank becomes `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

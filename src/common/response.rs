use crate::common::StatusCode;
use crate::error::FieldErrors;
use axum::{
    Json,
    http::{StatusCode as HttpStatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Standard error body
///
/// Every failed request is answered with this shape so clients can rely on a
/// single format for validation, lookup and storage failures.
///
/// # Example
/// ```
/// use product_catalog::common::{ErrorResponse, StatusCode};
///
/// let response = ErrorResponse::new(StatusCode::NotFound, "Product 3 not found");
/// assert_eq!(response.status_code, 404);
/// assert_eq!(response.error, "NotFound");
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,

    pub error: String,

    pub message: String,

    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,

    pub timestamp: String,

    #[serde(skip)]
    pub http_status: HttpStatusCode,
}

impl ErrorResponse {
    /// Create an error body
    ///
    /// The `error` code is derived from the `StatusCode` variant name.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let http_status: HttpStatusCode = status.into();
        Self {
            status_code: http_status.as_u16(),
            error: status.to_string(),
            message: message.into(),
            errors: FieldErrors::new(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            http_status,
        }
    }

    /// Attach field-level validation detail.
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}

/// `201 Created` with a `Location` header pointing at the new resource.
#[derive(Debug)]
pub struct Created<T: Serialize> {
    pub location: String,
    pub body: T,
}

impl<T: Serialize> Created<T> {
    pub fn new(location: impl Into<String>, body: T) -> Self {
        Self {
            location: location.into(),
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (
            HttpStatusCode::CREATED,
            [(header::LOCATION, self.location)],
            Json(self.body),
        )
            .into_response()
    }
}

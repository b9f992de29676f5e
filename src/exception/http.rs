use crate::common::{ErrorResponse, StatusCode};
use crate::error::{CatalogError, StorageError};
use crate::exception::ExceptionFilter;
use axum::response::{IntoResponse, Response};

/// The default exception filter: maps each `CatalogError` to a status code
/// and an `ErrorResponse` body.
#[derive(Default)]
pub struct HttpExceptionFilter;

impl HttpExceptionFilter {
    pub fn status_for(error: &CatalogError) -> StatusCode {
        match error {
            CatalogError::Validation { .. } => StatusCode::BadRequest,
            CatalogError::NotFound { .. } => StatusCode::NotFound,
            CatalogError::Storage(StorageError::Constraint(_)) => StatusCode::Conflict,
            CatalogError::Storage(_)
            | CatalogError::DependencyNotFound { .. }
            | CatalogError::DowncastFailed { .. }
            | CatalogError::Internal(_) => StatusCode::InternalServerError,
        }
    }
}

impl ExceptionFilter for HttpExceptionFilter {
    fn catch(&self, error: CatalogError) -> Response {
        let status = Self::status_for(&error);

        let message = match status {
            StatusCode::InternalServerError => {
                tracing::error!(error = %error, "request failed");
                // Backend detail stays in the logs.
                "Internal Server Error".to_string()
            }
            _ => {
                tracing::debug!(error = %error, status = %status, "request rejected");
                error.to_string()
            }
        };

        let mut body = ErrorResponse::new(status, message);
        if let CatalogError::Validation { fields, .. } = error {
            body = body.with_errors(fields);
        }
        body.into_response()
    }
}

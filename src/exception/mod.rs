use crate::error::CatalogError;
use axum::response::Response;

pub mod http;

/// The ExceptionFilter trait
///
/// Filters turn errors raised during request processing into responses.
/// They must always return a valid Response.
pub trait ExceptionFilter: Send + Sync + 'static {
    /// Catch an error and return a response
    fn catch(&self, error: CatalogError) -> Response;
}

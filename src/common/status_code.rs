use axum::http::StatusCode as HttpStatusCode;
use strum_macros::Display;

/// Error statuses produced by the catalog API.
///
/// The variant name doubles as the machine-readable `error` code in error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StatusCode {
    BadRequest,
    NotFound,
    Conflict,
    InternalServerError,
}

impl From<StatusCode> for HttpStatusCode {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::BadRequest => HttpStatusCode::BAD_REQUEST,
            StatusCode::NotFound => HttpStatusCode::NOT_FOUND,
            StatusCode::Conflict => HttpStatusCode::CONFLICT,
            StatusCode::InternalServerError => HttpStatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

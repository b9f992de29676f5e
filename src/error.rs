use std::collections::BTreeMap;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Field-level validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Failures raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage connection failed: {0}")]
    Connection(String),

    #[error("Storage constraint violated: {0}")]
    Constraint(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Validation failed: {message}")]
    Validation { message: String, fields: FieldErrors },

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Dependency not found: {type_name}")]
    DependencyNotFound { type_name: String },

    #[error("Failed to downcast type: {type_name}")]
    DowncastFailed { type_name: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// A validation failure on a single field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut fields = FieldErrors::new();
        fields.insert(field.into(), vec![message.clone()]);
        Self::Validation { message, fields }
    }

    pub fn product_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "Product",
            id,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }
}

#[cfg(feature = "sea-orm-db")]
impl From<sea_orm::DbErr> for StorageError {
    fn from(err: sea_orm::DbErr) -> Self {
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
            return StorageError::Constraint(message);
        }
        match err {
            sea_orm::DbErr::Conn(e) => StorageError::Connection(e.to_string()),
            sea_orm::DbErr::ConnectionAcquire(e) => StorageError::Connection(e.to_string()),
            other => StorageError::Backend(other.to_string()),
        }
    }
}

impl axum::response::IntoResponse for CatalogError {
    fn into_response(self) -> axum::response::Response {
        use crate::exception::ExceptionFilter;
        crate::exception::http::HttpExceptionFilter.catch(self)
    }
}

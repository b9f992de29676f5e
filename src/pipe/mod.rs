use crate::error::{CatalogError, FieldErrors};
use async_trait::async_trait;

pub mod builtins;
pub mod extract;

pub type PipeResult<T> = Result<T, PipeError>;

#[derive(Debug, thiserror::Error)]
pub enum PipeError {
    #[error("Validation failed: {message}")]
    Validation { message: String, fields: FieldErrors },

    #[error("Transformation of `{field}` failed: {message}")]
    Transformation { field: String, message: String },
}

impl PipeError {
    /// Wrap a set of field violations, summarising the offending fields.
    pub fn validation(fields: FieldErrors) -> Self {
        let names: Vec<&str> = fields.keys().map(String::as_str).collect();
        Self::Validation {
            message: format!("invalid fields: {}", names.join(", ")),
            fields,
        }
    }
}

impl From<PipeError> for CatalogError {
    fn from(err: PipeError) -> Self {
        match err {
            PipeError::Validation { message, fields } => CatalogError::Validation { message, fields },
            PipeError::Transformation { field, message } => CatalogError::validation(field, message),
        }
    }
}

/// Shape constraints checked on inbound payloads before dispatch.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// The Pipe trait for transformation and validation
#[async_trait]
pub trait Pipe: Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: Send + 'static;

    async fn transform(&self, input: Self::Input) -> PipeResult<Self::Output>;
}

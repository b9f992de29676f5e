use crate::error::FieldErrors;
use crate::pipe::Validate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

pub const NAME_MAX_LEN: usize = 255;

/// A catalog entry. `id == 0` on create asks storage to assign one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    /// Exact decimal, written as a JSON number without going through `f64`.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub price: Option<Decimal>,
}

impl Product {
    pub fn new(id: i32, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: Some(name.into()),
            price: Some(price),
        }
    }
}

impl Validate for Product {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.id < 0 {
            push(&mut errors, "id", "must be non-negative");
        }
        if let Some(name) = &self.name {
            if name.chars().count() > NAME_MAX_LEN {
                push(
                    &mut errors,
                    "name",
                    format!("must be at most {} characters", NAME_MAX_LEN),
                );
            }
        }
        if self.price.is_some_and(|price| price < Decimal::ZERO) {
            push(&mut errors, "price", "must be non-negative");
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// An identifier delivered in a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRequest {
    #[serde(alias = "Id")]
    pub id: i32,
}

/// Body accepted by the lookup endpoint: `{"id": 3}` or a bare `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRequestBody {
    Wrapped(IdRequest),
    Bare(i32),
}

// Dispatches on the JSON value by hand: `#[serde(untagged)]` cannot read
// numbers once serde_json keeps them at arbitrary precision.
impl<'de> Deserialize<'de> for IdRequestBody {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(number) => number
                .as_i64()
                .and_then(|id| i32::try_from(id).ok())
                .map(IdRequestBody::Bare)
                .ok_or_else(|| de::Error::custom(format!("`{}` is not a 32-bit integer id", number))),
            value @ Value::Object(_) => IdRequest::deserialize(value)
                .map(IdRequestBody::Wrapped)
                .map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "expected an id object or an integer, found `{}`",
                other
            ))),
        }
    }
}

impl IdRequestBody {
    pub fn id(self) -> i32 {
        match self {
            IdRequestBody::Wrapped(IdRequest { id }) | IdRequestBody::Bare(id) => id,
        }
    }
}

impl Validate for IdRequestBody {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.id() < 0 {
            push(&mut errors, "id", "must be non-negative");
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

use crate::pipe::{Pipe, PipeError, PipeResult, Validate};
use async_trait::async_trait;
use std::marker::PhantomData;

/// A pipe that parses a path segment into a 32-bit id
#[derive(Default)]
pub struct ParseIntPipe;

#[async_trait]
impl Pipe for ParseIntPipe {
    type Input = String;
    type Output = i32;

    async fn transform(&self, input: String) -> PipeResult<i32> {
        input
            .trim()
            .parse::<i32>()
            .map_err(|_| PipeError::Transformation {
                field: "id".to_string(),
                message: format!("`{}` is not a valid integer id", input),
            })
    }
}

/// A pipe that runs a payload's `Validate` rules and passes it through unchanged
pub struct ValidationPipe<T>(PhantomData<fn() -> T>);

impl<T> Default for ValidationPipe<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

#[async_trait]
impl<T> Pipe for ValidationPipe<T>
where
    T: Validate + Send + 'static,
{
    type Input = T;
    type Output = T;

    async fn transform(&self, input: T) -> PipeResult<T> {
        input.validate().map_err(PipeError::validation)?;
        Ok(input)
    }
}

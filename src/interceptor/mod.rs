use async_trait::async_trait;
use axum::{extract::Request, response::Response};
use std::future::Future;
use std::pin::Pin;

pub mod layer;
pub mod logging;

pub use layer::InterceptorLayer;
pub use logging::LoggingInterceptor;

pub type BoxResponseFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Represents the next handler in the chain
pub struct Next {
    run: Box<dyn FnOnce(Request) -> BoxResponseFuture + Send>,
}

impl Next {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Request) -> BoxResponseFuture + Send + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Execute the rest of the chain
    pub async fn run(self, request: Request) -> Response {
        (self.run)(request).await
    }
}

/// The Interceptor trait
///
/// Interceptors can inspect or modify the request before it reaches the
/// handler, and the response after the handler returns. Handler failures are
/// already responses by the time they get here, so interceptors never fail.
#[async_trait]
pub trait Interceptor: Send + Sync + 'static {
    async fn intercept(&self, request: Request, next: Next) -> Response;
}

use crate::interceptor::{Interceptor, Next};
use async_trait::async_trait;
use axum::{extract::Request, http::HeaderValue, response::Response};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// An interceptor that logs request timing and status, tagging each
/// exchange with a request id
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn intercept(&self, request: Request, next: Next) -> Response {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let start = Instant::now();

        tracing::debug!(%request_id, "--> {} {}", method, uri);

        let mut response = next.run(request).await;
        let status = response.status();
        let elapsed = start.elapsed();

        if status.is_server_error() {
            tracing::warn!(%request_id, status = status.as_u16(), ?elapsed, "<-- {} {}", method, uri);
        } else {
            tracing::info!(%request_id, status = status.as_u16(), ?elapsed, "<-- {} {}", method, uri);
        }

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
}

use crate::interceptor::{BoxResponseFuture, Interceptor, Next};
use axum::{extract::Request, response::Response};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower Layer running a chain of Interceptors around the inner service
///
/// The first interceptor in the list is the outermost.
#[derive(Clone)]
pub struct InterceptorLayer {
    interceptors: Arc<Vec<Arc<dyn Interceptor>>>,
}

impl InterceptorLayer {
    pub fn new(interceptors: Vec<Arc<dyn Interceptor>>) -> Self {
        Self {
            interceptors: Arc::new(interceptors),
        }
    }
}

impl<S> Layer<S> for InterceptorLayer {
    type Service = InterceptorService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InterceptorService {
            inner,
            interceptors: Arc::clone(&self.interceptors),
        }
    }
}

#[derive(Clone)]
pub struct InterceptorService<S> {
    inner: S,
    interceptors: Arc<Vec<Arc<dyn Interceptor>>>,
}

impl<S> Service<Request> for InterceptorService<S>
where
    S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        // Take the service that was polled ready and leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let interceptors = Arc::clone(&self.interceptors);

        Box::pin(async move {
            let mut chain = Next::new(move |req: Request| -> BoxResponseFuture {
                Box::pin(async move {
                    match inner.call(req).await {
                        Ok(response) => response,
                        Err(never) => match never {},
                    }
                })
            });

            for interceptor in interceptors.iter().rev() {
                let interceptor = Arc::clone(interceptor);
                let next = chain;
                chain = Next::new(move |req: Request| -> BoxResponseFuture {
                    Box::pin(async move { interceptor.intercept(req, next).await })
                });
            }

            Ok(chain.run(request).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{Router, body::Body, http::HeaderValue, routing::get};
    use tower::ServiceExt;

    struct Tag(&'static str);

    #[async_trait]
    impl Interceptor for Tag {
        async fn intercept(&self, request: Request, next: Next) -> Response {
            let mut response = next.run(request).await;
            response
                .headers_mut()
                .append("x-trace", HeaderValue::from_static(self.0));
            response
        }
    }

    #[tokio::test]
    async fn test_interceptors_wrap_in_order() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(InterceptorLayer::new(vec![
                Arc::new(Tag("outer")),
                Arc::new(Tag("inner")),
            ]));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // The inner interceptor sees the response first
        let trace: Vec<_> = response
            .headers()
            .get_all("x-trace")
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(trace, vec!["inner", "outer"]);
    }
}

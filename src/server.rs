//! Application bootstrap: storage selection, module registration, router
//! assembly and graceful shutdown.

use crate::common::{ErrorResponse, StatusCode};
use crate::config::AppConfig;
use crate::di::{Container, ContainerBuilder};
use crate::error::Result;
use crate::infrastructure::MemoryDatabase;
use crate::interceptor::{InterceptorLayer, LoggingInterceptor};
use crate::module::Module;
use crate::modules::product::{ProductController, ProductModule};
use axum::{Router, http::Uri};
use std::sync::Arc;
use tokio::signal;

/// Build the container for `config`: storage first, then the product module.
pub async fn build_container(config: &AppConfig) -> Result<Container> {
    let mut container = ContainerBuilder::new()
        .register(config.delete_policy)
        .build();

    register_storage(&mut container, config).await?;
    ProductModule::register(&mut container)?;
    Ok(container)
}

#[cfg(feature = "sea-orm-db")]
async fn register_storage(container: &mut Container, config: &AppConfig) -> Result<()> {
    match &config.database_url {
        Some(url) => {
            let conn = crate::infrastructure::postgres::connect(url).await?;
            container.register(conn);
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory storage");
            container.register(MemoryDatabase::new());
        }
    }
    Ok(())
}

#[cfg(not(feature = "sea-orm-db"))]
async fn register_storage(container: &mut Container, _config: &AppConfig) -> Result<()> {
    tracing::info!("Using in-memory storage");
    container.register(MemoryDatabase::new());
    Ok(())
}

/// The full HTTP surface, with request logging and a JSON 404 fallback.
pub fn build_router(controller: Arc<ProductController>) -> Router {
    Router::new()
        .merge(ProductController::router(controller))
        .fallback(route_not_found)
        .layer(InterceptorLayer::new(vec![Arc::new(LoggingInterceptor)]))
}

async fn route_not_found(uri: Uri) -> ErrorResponse {
    ErrorResponse::new(StatusCode::NotFound, format!("No route for {}", uri.path()))
}

/// Create a future that completes when a shutdown signal is received
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }
}

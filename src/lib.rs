//! # Product Catalog
//!
//! A small REST API for product records, layered as
//! endpoint (controller) → service → repository → storage.
//!
//! ## Layers
//!
//! - **Controller**: validates request shape, dispatches, maps outcomes to status codes
//! - **Service**: existence checks and id agreement before update/delete
//! - **Repository**: raw CRUD over in-memory or PostgreSQL (`sea-orm-db` feature) storage
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use product_catalog::config::{AppConfig, ConfigService};
//! use product_catalog::modules::product::ProductController;
//! use product_catalog::server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_service(&ConfigService::new())?;
//!     let container = server::build_container(&config).await?;
//!     let router = server::build_router(container.resolve::<ProductController>()?);
//!
//!     let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod common;
pub mod config;
pub mod di;
pub mod error;
pub mod exception;
pub mod infrastructure;
pub mod interceptor;
pub mod module;
pub mod modules;
pub mod pipe;
pub mod server;

pub use error::{CatalogError, Result, StorageError};

/// Prelude module for convenient imports
///
/// ```
/// use product_catalog::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::{Created, ErrorResponse};
    pub use crate::config::{AppConfig, ConfigService};
    pub use crate::di::{Container, ContainerBuilder, Injectable};
    pub use crate::error::{CatalogError, Result, StorageError};
    pub use crate::module::Module;
    pub use crate::modules::product::{
        DeletePolicy, IdRequest, Product, ProductController, ProductModule, ProductRepository,
        ProductService,
    };
    pub use std::sync::Arc;
}

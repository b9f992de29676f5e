pub mod controller;
#[cfg(feature = "sea-orm-db")]
pub mod entity;
pub mod model;
pub mod repository;
pub mod service;

pub use controller::ProductController;
pub use model::{IdRequest, IdRequestBody, Product};
pub use repository::{MemoryProductRepository, ProductRepository};
#[cfg(feature = "sea-orm-db")]
pub use repository::SeaOrmProductRepository;
pub use service::{DeletePolicy, ProductService};

use crate::di::Container;
use crate::error::Result;
use crate::module::Module;
use std::sync::Arc;

/// Registers the product repository, service and controller.
///
/// The repository backend follows whatever storage the container holds: a
/// SeaORM `DatabaseConnection` when present, otherwise the `MemoryDatabase`.
/// A `DeletePolicy` must already be registered.
pub struct ProductModule;

impl Module for ProductModule {
    fn register(container: &mut Container) -> Result<()> {
        #[cfg(feature = "sea-orm-db")]
        if container.contains::<sea_orm::DatabaseConnection>() {
            container.provide::<SeaOrmProductRepository>()?;
            container.register_trait::<dyn ProductRepository, SeaOrmProductRepository, _>(|r| {
                r as Arc<dyn ProductRepository>
            });
        }

        if !container.contains::<dyn ProductRepository>() {
            container.provide::<MemoryProductRepository>()?;
            container.register_trait::<dyn ProductRepository, MemoryProductRepository, _>(|r| {
                r as Arc<dyn ProductRepository>
            });
        }

        container
            .provide::<ProductService>()?
            .provide::<ProductController>()?;

        tracing::debug!("ProductModule registered");
        Ok(())
    }
}

use crate::di::Container;
use crate::error::Result;

/// Trait for feature modules
///
/// A module registers its providers into the container in dependency order,
/// resolving what it needs from providers registered before it.
///
/// # Example
/// ```
/// use product_catalog::di::ContainerBuilder;
/// use product_catalog::infrastructure::MemoryDatabase;
/// use product_catalog::module::Module;
/// use product_catalog::modules::product::{DeletePolicy, ProductController, ProductModule};
///
/// let mut container = ContainerBuilder::new()
///     .register(MemoryDatabase::new())
///     .register(DeletePolicy::Strict)
///     .build();
/// ProductModule::register(&mut container).unwrap();
/// assert!(container.resolve::<ProductController>().is_ok());
/// ```
pub trait Module {
    /// Register all providers and controllers in this module
    fn register(container: &mut Container) -> Result<()>;
}

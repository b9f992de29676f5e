use crate::di::Container;

/// Seeds a container with the storage and settings the modules depend on.
///
/// Modules register their own providers afterwards via [`crate::module::Module`].
///
/// # Example
/// ```
/// use product_catalog::di::ContainerBuilder;
/// use product_catalog::infrastructure::MemoryDatabase;
/// use product_catalog::modules::product::DeletePolicy;
///
/// let container = ContainerBuilder::new()
///     .register(MemoryDatabase::new())
///     .register(DeletePolicy::Idempotent)
///     .build();
/// assert!(container.contains::<MemoryDatabase>());
/// assert_eq!(*container.resolve::<DeletePolicy>().unwrap(), DeletePolicy::Idempotent);
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: 'static + Send + Sync>(mut self, instance: T) -> Self {
        self.container.register(instance);
        self
    }

    pub fn build(self) -> Container {
        self.container
    }
}

use crate::di::Container;
use crate::error::Result;

/// Types that can be constructed from the dependency container
///
/// Implementations resolve their collaborators and hand them to the type's
/// ordinary constructor, so the same wiring can be done by hand in tests.
///
/// # Example
/// ```ignore
/// impl Injectable for ProductService {
///     fn inject(container: &Container) -> Result<Self> {
///         let repository = container.resolve_trait::<dyn ProductRepository>()?;
///         Ok(Self::new(repository))
///     }
/// }
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Create an instance by resolving dependencies from the container
    ///
    /// # Errors
    /// Returns an error if any required dependency is not found in the container.
    fn inject(container: &Container) -> Result<Self>;
}

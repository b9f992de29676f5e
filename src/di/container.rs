use crate::di::Injectable;
use crate::error::{CatalogError, Result};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

type AnyArc = Arc<dyn Any + Send + Sync>;

/// Casts a registered implementation (as `Arc<dyn Any>`) into an
/// `Arc<dyn Any>` wrapping the `Arc<dyn Trait>` it is bound to.
type CasterFn = Arc<dyn Fn(AnyArc) -> Option<AnyArc> + Send + Sync>;

/// Thread-safe dependency container used by the composition root.
///
/// Providers are registered once at startup and resolved while constructing
/// the layers above them; request handlers never reach into the container.
pub struct Container {
    services: DashMap<TypeId, AnyArc>,
    trait_mappings: DashMap<TypeId, TypeId>,
    casters: DashMap<TypeId, CasterFn>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
            trait_mappings: DashMap::new(),
            casters: DashMap::new(),
        }
    }

    pub fn register<T: 'static + Send + Sync>(&mut self, instance: T) -> &mut Self {
        self.services.insert(TypeId::of::<T>(), Arc::new(instance));
        self
    }

    /// Bind `Trait` to the registered `Impl` so `resolve_trait::<Trait>()` works.
    pub fn register_trait<Trait, Impl, F>(&mut self, caster_fn: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        Impl: 'static + Send + Sync,
        F: Fn(Arc<Impl>) -> Arc<Trait> + 'static + Send + Sync,
    {
        let trait_id = TypeId::of::<Trait>();
        self.trait_mappings.insert(trait_id, TypeId::of::<Impl>());

        let caster: CasterFn = Arc::new(move |instance: AnyArc| {
            let concrete = instance.downcast::<Impl>().ok()?;
            let trait_obj: Arc<Trait> = caster_fn(concrete);
            Some(Arc::new(trait_obj) as AnyArc)
        });
        self.casters.insert(trait_id, caster);
        self
    }

    /// Build `T` from what is already registered and register the result.
    pub fn provide<T: Injectable>(&mut self) -> Result<&mut Self> {
        let instance = T::inject(self)?;
        Ok(self.register(instance))
    }

    pub fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let entry = self
            .services
            .get(&TypeId::of::<T>())
            .ok_or_else(|| CatalogError::DependencyNotFound {
                type_name: std::any::type_name::<T>().to_string(),
            })?;
        entry
            .value()
            .clone()
            .downcast::<T>()
            .map_err(|_| CatalogError::DowncastFailed {
                type_name: std::any::type_name::<T>().to_string(),
            })
    }

    pub fn resolve_trait<T: ?Sized + 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let trait_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        let caster = self
            .casters
            .get(&trait_id)
            .ok_or_else(|| CatalogError::DependencyNotFound {
                type_name: type_name.to_string(),
            })?;

        let impl_id = self.trait_mappings.get(&trait_id).ok_or_else(|| {
            CatalogError::DependencyNotFound {
                type_name: format!("No implementation mapping found for trait '{}'", type_name),
            }
        })?;

        let instance = self.services.get(impl_id.value()).ok_or_else(|| {
            CatalogError::DependencyNotFound {
                type_name: format!("Implementation for trait '{}' not registered", type_name),
            }
        })?;

        let wrapper = (caster.value())(instance.value().clone())
            .and_then(|cast| cast.downcast::<Arc<T>>().ok())
            .ok_or_else(|| CatalogError::DowncastFailed {
                type_name: type_name.to_string(),
            })?;
        Ok(wrapper.as_ref().clone())
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.services.contains_key(&type_id) || self.trait_mappings.contains_key(&type_id)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

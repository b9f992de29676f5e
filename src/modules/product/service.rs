use super::model::Product;
use super::repository::ProductRepository;
use crate::di::{Container, Injectable};
use crate::error::Result;
use std::sync::Arc;
use strum_macros::{Display, EnumString, VariantNames};

/// How `delete_product` reports a delete of an id that has no row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeletePolicy {
    /// Report `false` when nothing was removed.
    #[default]
    Strict,
    /// Always report success.
    Idempotent,
}

pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
    delete_policy: DeletePolicy,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            repository,
            delete_policy: DeletePolicy::default(),
        }
    }

    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    pub async fn get_all_products(&self) -> Result<Vec<Product>> {
        Ok(self.repository.get_all().await?)
    }

    pub async fn get_product_by_id(&self, id: i32) -> Result<Option<Product>> {
        Ok(self.repository.get_by_id(id).await?)
    }

    /// Insert unconditionally; duplicate ids are left to storage to reject.
    pub async fn create_product(&self, product: Product) -> Result<Product> {
        let stored = self.repository.add(product).await?;
        tracing::debug!(id = stored.id, "product created");
        Ok(stored)
    }

    /// Replace the stored row with `product`.
    ///
    /// Returns `false` without touching storage when no row has `id` or when
    /// `product.id` disagrees with `id`.
    pub async fn update_product(&self, id: i32, product: Product) -> Result<bool> {
        if id != product.id {
            tracing::debug!(id, body_id = product.id, "update rejected: id mismatch");
            return Ok(false);
        }
        if self.repository.get_by_id(id).await?.is_none() {
            tracing::debug!(id, "update rejected: no such product");
            return Ok(false);
        }
        let updated = self.repository.update(product).await?;
        tracing::debug!(id, updated, "product updated");
        Ok(updated)
    }

    pub async fn delete_product(&self, id: i32) -> Result<bool> {
        let removed = self.repository.delete(id).await?;
        tracing::debug!(id, removed, policy = %self.delete_policy, "product delete");
        Ok(match self.delete_policy {
            DeletePolicy::Strict => removed,
            DeletePolicy::Idempotent => true,
        })
    }
}

impl Injectable for ProductService {
    fn inject(container: &Container) -> Result<Self> {
        let repository = container.resolve_trait::<dyn ProductRepository>()?;
        let policy = container.resolve::<DeletePolicy>()?;
        Ok(Self::new(repository).with_delete_policy(*policy))
    }
}

use super::model::Product;
use crate::di::{Container, Injectable};
use crate::error::StorageError;
use crate::infrastructure::MemoryDatabase;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const PRODUCT_TABLE: &str = "product";

/// Raw CRUD over stored products. No business rules live here.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every row, ordered by id.
    async fn get_all(&self) -> Result<Vec<Product>, StorageError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, StorageError>;

    /// Insert a new row and return it as stored. `product.id == 0` lets
    /// storage assign the id; a duplicate id is a `StorageError::Constraint`.
    async fn add(&self, product: Product) -> Result<Product, StorageError>;

    /// Overwrite the row matching `product.id`. Returns `false` without
    /// inserting when no such row exists.
    async fn update(&self, product: Product) -> Result<bool, StorageError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, StorageError>;
}

// Stored form: price kept as its decimal text so no precision is lost.
#[derive(Serialize, Deserialize)]
struct ProductRow {
    id: i32,
    name: Option<String>,
    price: Option<String>,
}

fn encode(product: &Product) -> Result<serde_json::Value, StorageError> {
    let row = ProductRow {
        id: product.id,
        name: product.name.clone(),
        price: product.price.map(|p| p.to_string()),
    };
    serde_json::to_value(row).map_err(|e| StorageError::Backend(e.to_string()))
}

fn decode(value: serde_json::Value) -> Result<Product, StorageError> {
    let row: ProductRow =
        serde_json::from_value(value).map_err(|e| StorageError::Backend(e.to_string()))?;
    let price = row
        .price
        .map(|p| p.parse::<Decimal>())
        .transpose()
        .map_err(|e| StorageError::Backend(format!("corrupt price in row {}: {}", row.id, e)))?;
    Ok(Product {
        id: row.id,
        name: row.name,
        price,
    })
}

/// Products stored in the in-process `MemoryDatabase`.
pub struct MemoryProductRepository {
    db: Arc<MemoryDatabase>,
}

impl MemoryProductRepository {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

impl Injectable for MemoryProductRepository {
    fn inject(container: &Container) -> crate::Result<Self> {
        Ok(Self::new(container.resolve::<MemoryDatabase>()?))
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>, StorageError> {
        self.db.scan(PRODUCT_TABLE).into_iter().map(decode).collect()
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, StorageError> {
        self.db.get(PRODUCT_TABLE, id).map(decode).transpose()
    }

    async fn add(&self, product: Product) -> Result<Product, StorageError> {
        let id = self.db.insert_with(PRODUCT_TABLE, product.id, |id| {
            encode(&Product {
                id,
                ..product.clone()
            })
        })?;
        Ok(Product { id, ..product })
    }

    async fn update(&self, product: Product) -> Result<bool, StorageError> {
        let row = encode(&product)?;
        Ok(self.db.replace(PRODUCT_TABLE, product.id, row))
    }

    async fn delete(&self, id: i32) -> Result<bool, StorageError> {
        Ok(self.db.remove(PRODUCT_TABLE, id))
    }
}

#[cfg(feature = "sea-orm-db")]
pub use sea_orm_repository::SeaOrmProductRepository;

#[cfg(feature = "sea-orm-db")]
mod sea_orm_repository {
    use super::{PRODUCT_TABLE, ProductRepository};
    use crate::di::{Container, Injectable};
    use crate::error::StorageError;
    use crate::modules::product::entity::{self, Column, Entity};
    use crate::modules::product::model::Product;
    use async_trait::async_trait;
    use sea_orm::ActiveValue::{NotSet, Set};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
        QueryFilter, QueryOrder, TransactionTrait,
    };
    use std::sync::Arc;

    /// Moves the serial sequence behind `table.id` up to the highest stored
    /// id without ever lowering it, so generated ids skip client-chosen ones.
    fn sync_sequence_sql(table: &str) -> String {
        let sequence = format!("pg_get_serial_sequence('{table}', 'id')");
        format!(
            "SELECT setval({sequence}, GREATEST((SELECT MAX(id) FROM {table}), \
             pg_sequence_last_value({sequence}::regclass)))"
        )
    }

    /// Products stored in PostgreSQL through a SeaORM connection pool.
    pub struct SeaOrmProductRepository {
        conn: Arc<DatabaseConnection>,
    }

    impl SeaOrmProductRepository {
        pub fn new(conn: Arc<DatabaseConnection>) -> Self {
            Self { conn }
        }
    }

    impl Injectable for SeaOrmProductRepository {
        fn inject(container: &Container) -> crate::Result<Self> {
            Ok(Self::new(container.resolve::<DatabaseConnection>()?))
        }
    }

    #[async_trait]
    impl ProductRepository for SeaOrmProductRepository {
        async fn get_all(&self) -> Result<Vec<Product>, StorageError> {
            let rows = Entity::find()
                .order_by_asc(Column::Id)
                .all(self.conn.as_ref())
                .await?;
            Ok(rows.into_iter().map(Product::from).collect())
        }

        async fn get_by_id(&self, id: i32) -> Result<Option<Product>, StorageError> {
            let row = Entity::find_by_id(id).one(self.conn.as_ref()).await?;
            Ok(row.map(Product::from))
        }

        async fn add(&self, product: Product) -> Result<Product, StorageError> {
            if product.id == 0 {
                // Defers to the column's serial default
                let model = entity::ActiveModel {
                    id: NotSet,
                    name: Set(product.name),
                    price: Set(product.price),
                };
                let saved = model.insert(self.conn.as_ref()).await?;
                return Ok(saved.into());
            }

            let txn = self.conn.begin().await?;
            let model = entity::ActiveModel {
                id: Set(product.id),
                name: Set(product.name),
                price: Set(product.price),
            };
            let saved = model.insert(&txn).await?;
            txn.execute_unprepared(&sync_sequence_sql(PRODUCT_TABLE)).await?;
            txn.commit().await?;
            tracing::debug!(id = saved.id, "advanced product id sequence past explicit id");
            Ok(saved.into())
        }

        async fn update(&self, product: Product) -> Result<bool, StorageError> {
            let changes = entity::ActiveModel {
                id: NotSet,
                name: Set(product.name),
                price: Set(product.price),
            };
            let result = Entity::update_many()
                .set(changes)
                .filter(Column::Id.eq(product.id))
                .exec(self.conn.as_ref())
                .await?;
            Ok(result.rows_affected > 0)
        }

        async fn delete(&self, id: i32) -> Result<bool, StorageError> {
            let result = Entity::delete_by_id(id).exec(self.conn.as_ref()).await?;
            Ok(result.rows_affected > 0)
        }
    }

}

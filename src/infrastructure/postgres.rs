use crate::error::StorageError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

/// Open the SeaORM connection pool used by `SeaOrmProductRepository`.
pub async fn connect(url: &str) -> Result<DatabaseConnection, StorageError> {
    tracing::info!("Database: Initializing connection pool...");

    let mut options = ConnectOptions::new(url.to_owned());
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let conn = Database::connect(options).await?;
    tracing::info!("Database: Connection pool initialized");
    Ok(conn)
}

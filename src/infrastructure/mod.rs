pub mod database;
#[cfg(feature = "sea-orm-db")]
pub mod postgres;

pub use database::MemoryDatabase;

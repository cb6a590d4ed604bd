use crate::config::Config;
use crate::model::{attendance::AttendanceRecord, company::Company};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Connection string prefix selecting the in-process store.
pub const MEMORY_URL_PREFIX: &str = "memory:";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for the `companies` and `attendance_records` collections.
///
/// Every operation connects on demand; `connect` is exposed so startup and
/// health checks can force the connection early. Calling it again once
/// connected is a no-op.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    async fn connect(&self) -> Result<(), StoreError>;

    async fn insert_company(&self, company: &Company) -> Result<(), StoreError>;

    /// Newest first.
    async fn list_companies(&self) -> Result<Vec<Company>, StoreError>;

    async fn company_exists(&self, name: &str) -> Result<bool, StoreError>;

    async fn insert_attendance(&self, record: &AttendanceRecord) -> Result<(), StoreError>;

    /// Records whose `company` equals `company` exactly, newest first.
    async fn list_attendance(&self, company: &str) -> Result<Vec<AttendanceRecord>, StoreError>;
}

/// Picks the backend from `DATABASE_URL`. Nothing is connected yet.
pub fn open_store(config: &Config) -> Arc<dyn DocumentStore> {
    if config.database_url.starts_with(MEMORY_URL_PREFIX) {
        Arc::new(MemoryStore::default())
    } else {
        Arc::new(MySqlStore::new(
            &config.database_url,
            config.db_max_connections,
        ))
    }
}

use super::{DocumentStore, StoreError};
use crate::model::{attendance::AttendanceRecord, company::Company};
use async_trait::async_trait;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

// `seq` breaks ties between rows written within the same microsecond.
// `seq` breaks ties between rows written within the same microsecond.
// User text is stored as TEXT so no accepted input is rejected by a column
// width; indexes on TEXT columns cover a 191-character prefix.
const CREATE_COMPANIES: &str = r#"
    CREATE TABLE IF NOT EXISTS companies (
        seq BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        id CHAR(36) NOT NULL UNIQUE,
        name TEXT NOT NULL,
        process_type TEXT NOT NULL,
        process_date TEXT NOT NULL,
        created_at TIMESTAMP(6) NOT NULL,
        updated_at TIMESTAMP(6) NOT NULL,
        INDEX idx_companies_name (name(191)),
        INDEX idx_companies_created_at (created_at)
    )
"#;

const CREATE_ATTENDANCE: &str = r#"
    CREATE TABLE IF NOT EXISTS attendance_records (
        seq BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        id CHAR(36) NOT NULL UNIQUE,
        company TEXT NOT NULL,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        roll_number TEXT NOT NULL,
        branch TEXT NOT NULL,
        photo LONGTEXT NOT NULL,
        ip_address TEXT NOT NULL,
        created_at TIMESTAMP(6) NOT NULL,
        updated_at TIMESTAMP(6) NOT NULL,
        INDEX idx_attendance_company_created (company(191), created_at)
    )
"#;

/// MySQL-backed store. The pool is created on the first call that needs it
/// and reused for the life of the process.
pub struct MySqlStore {
    database_url: String,
    max_connections: u32,
    pool: OnceCell<MySqlPool>,
}

impl MySqlStore {
    pub fn new(database_url: &str, max_connections: u32) -> Self {
        Self {
            database_url: database_url.to_string(),
            max_connections: max_connections.max(1),
            pool: OnceCell::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    /// A failed attempt leaves the cell empty, so the next request retries.
    async fn pool(&self) -> Result<&MySqlPool, StoreError> {
        self.pool
            .get_or_try_init(|| async {
                let pool = MySqlPoolOptions::new()
                    .max_connections(self.max_connections)
                    .connect(&self.database_url)
                    .await
                    .map_err(|e| {
                        error!(error = %e, "MySQL connection error");
                        StoreError::Connect(e)
                    })?;

                sqlx::query(CREATE_COMPANIES).execute(&pool).await?;
                sqlx::query(CREATE_ATTENDANCE).execute(&pool).await?;

                info!(max_connections = self.max_connections, "Connected to MySQL");
                Ok::<_, StoreError>(pool)
            })
            .await
    }
}

#[async_trait]
impl DocumentStore for MySqlStore {
    fn backend_tag(&self) -> &'static str {
        "mysql"
    }

    async fn connect(&self) -> Result<(), StoreError> {
        if self.is_connected() {
            debug!("Already connected");
            return Ok(());
        }
        self.pool().await.map(|_| ())
    }

    async fn insert_company(&self, company: &Company) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO companies (id, name, process_type, process_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&company.id)
        .bind(&company.name)
        .bind(&company.process_type)
        .bind(&company.process_date)
        .bind(company.created_at)
        .bind(company.updated_at)
        .execute(self.pool().await?)
        .await?;

        Ok(())
    }

    async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, process_type, process_date, created_at, updated_at
            FROM companies
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .fetch_all(self.pool().await?)
        .await?;

        Ok(companies)
    }

    async fn company_exists(&self, name: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM companies WHERE name = BINARY ? LIMIT 1)",
        )
        .bind(name)
        .fetch_one(self.pool().await?)
        .await?;

        Ok(exists != 0)
    }

    async fn insert_attendance(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO attendance_records
            (id, company, name, email, roll_number, branch, photo, ip_address, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.company)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.roll_number)
        .bind(&record.branch)
        .bind(&record.photo)
        .bind(&record.ip_address)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(self.pool().await?)
        .await?;

        Ok(())
    }

    async fn list_attendance(&self, company: &str) -> Result<Vec<AttendanceRecord>, StoreError> {
        // BINARY keeps the match exact under case-insensitive collations.
        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT id, company, name, email, roll_number, branch, photo, ip_address,
                   created_at, updated_at
            FROM attendance_records
            WHERE company = BINARY ?
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .bind(company)
        .fetch_all(self.pool().await?)
        .await?;

        Ok(records)
    }
}

//! Database connection and repositories

pub mod events;
pub mod routes;
pub mod schema_sync;
pub mod sqlite_helpers;
pub mod tehnical_info;
pub mod users;

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use events::EventRepository;
pub use routes::RouteRepository;
pub use schema_sync::{SchemaSyncResult, sync_all_entity_schemas};
pub use tehnical_info::{TehnicalInfoOwner, TehnicalInfoRepository};
pub use users::{CreateUser, RefreshTokenRecord, UsersRepository};

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `url` and sync its schema
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid DATABASE_URL: {}", url))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(std::time::Duration::from_secs(10))
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        let db = Self { pool };
        db.sync_schema().await?;
        Ok(db)
    }

    /// A private in-memory database with the full schema, for tests
    pub async fn in_memory() -> Result<Self> {
        // A single connection keeps every query on the same memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;

        let db = Self { pool };
        db.sync_schema().await?;
        Ok(db)
    }

    async fn sync_schema(&self) -> Result<()> {
        let result = sync_all_entity_schemas(&self.pool).await;
        if !result.errors.is_empty() {
            anyhow::bail!("Schema sync failed: {}", result.errors.join("; "));
        }
        if !result.tables_created.is_empty() {
            tracing::info!(tables = ?result.tables_created, "Created tables");
        }
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get a users repository
    pub fn users(&self) -> UsersRepository {
        UsersRepository::new(self.pool.clone())
    }

    /// Get a routes repository
    pub fn routes(&self) -> RouteRepository {
        RouteRepository::new(self.pool.clone())
    }

    /// Get an events repository
    pub fn events(&self) -> EventRepository {
        EventRepository::new(self.pool.clone())
    }

    /// Get a technical info repository
    pub fn tehnical_info(&self) -> TehnicalInfoRepository {
        TehnicalInfoRepository::new(self.pool.clone())
    }
}

//! Storage handle for the SQLite-backed user store.
//!
//! Construction does no I/O. The first call to [`Storage::connection`] opens
//! the pool and applies the migrator; concurrent first callers share that one
//! attempt. A failed attempt is returned to its callers and the next call
//! tries again. After [`Storage::close`] every call fails with
//! [`STORAGE_CLOSED`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use configs::DatabaseConfig;

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub path: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    /// Deadline for acquiring a pooled connection when a unit of work opens.
    pub acquire_timeout: Duration,
    pub sqlx_logging: bool,
}

impl StorageConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_pool(path, &DatabaseConfig::default())
    }

    pub fn with_pool(path: impl Into<String>, pool: &DatabaseConfig) -> Self {
        Self {
            path: path.into(),
            max_connections: pool.max_connections,
            min_connections: pool.min_connections,
            connect_timeout: Duration::from_secs(pool.connect_timeout_secs),
            idle_timeout: Duration::from_secs(pool.idle_timeout_secs),
            max_lifetime: Duration::from_secs(pool.max_lifetime_secs),
            acquire_timeout: Duration::from_secs(pool.acquire_timeout_secs),
            sqlx_logging: pool.sqlx_logging,
        }
    }

    /// `mode=rwc` creates the database file when it does not exist yet.
    pub fn url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path)
    }

    fn connect_options(&self) -> ConnectOptions {
        let mut opts = ConnectOptions::new(self.url());
        opts.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .sqlx_logging(self.sqlx_logging);
        opts
    }
}

/// Message carried by `DbErr::Custom` once the handle has been closed.
pub const STORAGE_CLOSED: &str = "storage is closed";

pub struct Storage {
    config: StorageConfig,
    conn: OnceCell<DatabaseConnection>,
    closed: AtomicBool,
}

impl Storage {
    pub fn new(config: StorageConfig) -> Self {
        Self { config, conn: OnceCell::new(), closed: AtomicBool::new(false) }
    }

    pub fn path(&self) -> &str {
        &self.config.path
    }

    /// Whether the pool has been opened and the schema applied.
    pub fn is_initialized(&self) -> bool {
        self.conn.initialized()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Shared connection pool, opened and migrated on first use.
    pub async fn connection(&self) -> Result<&DatabaseConnection, DbErr> {
        if self.is_closed() {
            return Err(DbErr::Custom(STORAGE_CLOSED.into()));
        }
        let db = self.conn.get_or_try_init(|| self.open()).await?;
        // close() may have run while this call was opening the pool
        if self.is_closed() {
            return Err(DbErr::Custom(STORAGE_CLOSED.into()));
        }
        Ok(db)
    }

    /// Open a unit of work. Commit it explicitly; dropping it rolls back.
    pub async fn begin(&self) -> Result<DatabaseTransaction, DbErr> {
        let db = self.connection().await?;
        db.begin().await
    }

    /// Release the pool if it was ever opened. The handle stays closed;
    /// open a new `Storage` on the same path to use the data again.
    pub async fn close(&self) -> Result<(), DbErr> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        if let Some(db) = self.conn.get() {
            db.clone().close().await?;
            info!(path = %self.config.path, "storage closed");
        }
        Ok(())
    }

    async fn open(&self) -> Result<DatabaseConnection, DbErr> {
        common::env::ensure_parent_dir(&self.config.path)
            .await
            .map_err(|e| DbErr::Custom(e.to_string()))?;

        debug!(url = %self.config.url(), "connecting to storage");
        let db = Database::connect(self.config.connect_options()).await?;
        if let Err(e) = migration::Migrator::up(&db, None).await {
            warn!(path = %self.config.path, error = %e, "schema setup failed");
            let _ = db.close().await;
            return Err(e);
        }
        info!(path = %self.config.path, "storage ready, schema applied");
        Ok(db)
    }
}

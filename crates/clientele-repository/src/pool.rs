//! Database connection pool management.

use async_trait::async_trait;
use clientele_config::DatabaseConfig;
use clientele_core::{ClienteleError, ClienteleResult, MonitoredResource};
use clientele_resilience::with_timeout;
use parking_lot::RwLock;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::ConnectOptions;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Database pool wrapper.
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    pub async fn new(config: &DatabaseConfig) -> ClienteleResult<Self> {
        info!("Connecting to MySQL database...");

        let mut connect_options: MySqlConnectOptions = config
            .url
            .parse()
            .map_err(|e| ClienteleError::Configuration(format!("Invalid database URL: {e}")))?;
        if !config.log_queries {
            connect_options = connect_options.disable_statement_logging();
        }

        let options = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()));

        let pool = with_timeout(config.connect_timeout(), move || async move {
            options
                .connect_with(connect_options)
                .await
                .map_err(|e| ClienteleError::Database(format!("Failed to connect: {e}")))
        })
        .await
        .map_err(|e| {
            warn!("Failed to connect to database: {}", e);
            e
        })?;

        info!("MySQL connection pool established");
        Ok(Self { pool })
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    /// Checks if the database connection is healthy.
    pub async fn health_check(&self) -> ClienteleResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| ClienteleError::Database(format!("Health check failed: {e}")))?;
        Ok(())
    }

    /// Runs database migrations.
    pub async fn run_migrations(&self) -> ClienteleResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ClienteleError::Database(format!("Migration failed: {e}")))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Closes the database pool.
    pub async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// A replaceable handle on the database pool.
///
/// Startup never fails because the database is down: the connection simply
/// starts empty and every repository call reports
/// `BackingStoreUnavailable` until the liveness monitor reconnects it.
pub struct DatabaseConnection {
    config: DatabaseConfig,
    pool: RwLock<Option<Arc<DatabasePool>>>,
    migrated: AtomicBool,
}

impl DatabaseConnection {
    /// Component name reported by the liveness monitor.
    pub const COMPONENT: &'static str = "database";

    /// Creates a connection without attempting to reach the database.
    #[must_use]
    pub fn disconnected(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: RwLock::new(None),
            migrated: AtomicBool::new(false),
        }
    }

    /// Creates a connection and makes one attempt to open the pool.
    ///
    /// A failed attempt is logged and leaves the connection empty.
    pub async fn connect(config: DatabaseConfig) -> Self {
        let connection = Self::disconnected(config);
        if let Err(e) = connection.reconnect().await {
            warn!(error = %e, "Database unavailable at startup, continuing without it");
        }
        connection
    }

    /// Returns the current pool.
    pub fn current(&self) -> ClienteleResult<Arc<DatabasePool>> {
        self.pool
            .read()
            .as_ref()
            .map(Arc::clone)
            .ok_or(ClienteleError::BackingStoreUnavailable)
    }

    /// Returns true if a pool is currently installed.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.pool.read().is_some()
    }

    /// Returns the configured per-query timeout.
    #[must_use]
    pub const fn query_timeout(&self) -> std::time::Duration {
        self.config.query_timeout()
    }

    /// Pings the database through the current pool.
    pub async fn ping(&self) -> ClienteleResult<()> {
        let pool = self.current()?;
        with_timeout(self.config.query_timeout(), || pool.health_check()).await
    }

    /// Opens a fresh pool and swaps it in, closing the previous one.
    ///
    /// Migrations run after the first successful connect when enabled.
    pub async fn reconnect(&self) -> ClienteleResult<()> {
        let pool = DatabasePool::new(&self.config).await?;

        if self.config.run_migrations && !self.migrated.load(Ordering::Acquire) {
            pool.run_migrations().await?;
            self.migrated.store(true, Ordering::Release);
        }

        let previous = self.pool.write().replace(Arc::new(pool));
        if let Some(previous) = previous {
            previous.close().await;
        }
        Ok(())
    }

    /// Closes and removes the current pool.
    pub async fn close(&self) {
        let previous = self.pool.write().take();
        if let Some(pool) = previous {
            pool.close().await;
        }
    }
}

#[async_trait]
impl MonitoredResource for DatabaseConnection {
    fn name(&self) -> &str {
        Self::COMPONENT
    }

    async fn probe(&self) -> ClienteleResult<()> {
        self.ping().await
    }

    async fn reconnect(&self) -> ClienteleResult<()> {
        DatabaseConnection::reconnect(self).await
    }
}

impl std::fmt::Debug for DatabaseConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConnection")
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

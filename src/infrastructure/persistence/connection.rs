//! Lazily initialized, process-wide database handle.
//!
//! The pool is opened on first use rather than at startup, so a process that
//! is invoked per request (serverless) pays the connect cost once per warm
//! instance instead of once per request.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::AppError;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Settings used to open the PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub url: String,
    pub max_connections: u32,
    /// Bound on both the initial connect and later pool acquires.
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub run_migrations: bool,
}

/// Opens a new connection pool.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoolFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Connection`] if the store is unreachable within
    /// the configured timeout or migrations fail.
    async fn open(&self) -> Result<PgPool, AppError>;
}

/// Opens pools against PostgreSQL using [`ConnectionSettings`].
pub struct PgPoolFactory {
    settings: ConnectionSettings,
}

impl PgPoolFactory {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl PoolFactory for PgPoolFactory {
    async fn open(&self) -> Result<PgPool, AppError> {
        let settings = &self.settings;

        let connect = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.connect_timeout)
            .idle_timeout(settings.idle_timeout)
            .max_lifetime(settings.max_lifetime)
            .connect(&settings.url);

        let pool = tokio::time::timeout(settings.connect_timeout, connect)
            .await
            .map_err(|_| {
                AppError::Connection(format!(
                    "Timed out connecting to database after {}s",
                    settings.connect_timeout.as_secs()
                ))
            })?
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                AppError::Connection(e.to_string())
            })?;

        if settings.run_migrations {
            MIGRATOR
                .run(&pool)
                .await
                .map_err(|e| AppError::Connection(format!("Database migration failed: {e}")))?;
            debug!("Database migrations applied");
        }

        Ok(pool)
    }
}

/// Owns the single cached pool shared by all requests.
///
/// Initialization is single-flight: the slot is guarded by an async mutex,
/// so callers that arrive while the first open is in progress wait for it
/// and then reuse its pool. A failed open leaves the slot empty and the next
/// caller tries again.
pub struct ConnectionManager {
    factory: Arc<dyn PoolFactory>,
    pool: Mutex<Option<PgPool>>,
}

impl ConnectionManager {
    pub fn new(factory: Arc<dyn PoolFactory>) -> Self {
        Self {
            factory,
            pool: Mutex::new(None),
        }
    }

    /// Returns the cached pool, opening one if none is cached or the cached
    /// one has been closed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connection`] if a new pool cannot be opened.
    pub async fn get(&self) -> Result<PgPool, AppError> {
        let mut slot = self.pool.lock().await;

        if let Some(pool) = slot.as_ref()
            && !pool.is_closed()
        {
            return Ok(pool.clone());
        }

        if slot.is_some() {
            debug!("Cached pool is closed, reconnecting");
        }

        let pool = self.factory.open().await?;
        info!("Connected to database");

        *slot = Some(pool.clone());
        Ok(pool)
    }

    /// Returns true if an open pool is cached.
    pub async fn is_connected(&self) -> bool {
        self.pool
            .lock()
            .await
            .as_ref()
            .is_some_and(|pool| !pool.is_closed())
    }

    /// Closes and drops the cached pool, if any.
    pub async fn close(&self) {
        let Some(pool) = self.pool.lock().await.take() else {
            return;
        };

        let (size, idle) = (pool.size(), pool.num_idle());
        pool.close().await;
        info!(
            "Database pool closed ({} connections, {} idle released)",
            size, idle
        );
    }
}

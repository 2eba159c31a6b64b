//! Process-wide Postgres connection pool

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};
use tracing::instrument;

use crate::configuration::DatabaseSettings;
use crate::store::StoreError;

static MIGRATOR: Migrator = sqlx::migrate!();

/// A bounded pool shared by every request. Cloning is cheap and refers to
/// the same set of connections.
#[derive(Clone, Debug)]
pub struct ConnectionPool {
    inner: PgPool,
}

impl ConnectionPool {
    /// Builds the pool without connecting. Connections are established on
    /// first use, so an unreachable database shows up as failed requests
    /// rather than a failed startup.
    pub fn connect_lazy(settings: &DatabaseSettings) -> Result<Self, sqlx::Error> {
        let inner = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout())
            .connect_lazy_with(settings.with_db()?);
        Ok(Self { inner })
    }

    pub fn from_pool(inner: PgPool) -> Self {
        Self { inner }
    }

    /// Waits for a free connection, up to the configured acquire timeout.
    /// The connection goes back to the pool when the returned guard drops.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, StoreError> {
        self.inner.acquire().await.map_err(|e| {
            tracing::error!("Failed to acquire a database connection: {:?}", e);
            StoreError::acquire(e)
        })
    }

    #[instrument(name = "Running database migrations", skip(self))]
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        MIGRATOR.run(&self.inner).await
    }

    pub async fn close(&self) {
        self.inner.close().await
    }
}

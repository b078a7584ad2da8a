use std::time::Duration;

use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;

use crate::context::RequestContext;
use crate::error::{Result, StorageError};
use crate::store::StoreTx;

/// Relational backends the store knows how to bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Backend::Postgres)
        } else if url.starts_with("sqlite:") {
            Some(Backend::Sqlite)
        } else {
            None
        }
    }

    fn category_table_ddl(self) -> &'static str {
        match self {
            Backend::Postgres => {
                r#"
                CREATE TABLE IF NOT EXISTS category (
                    id BIGSERIAL PRIMARY KEY,
                    name VARCHAR(255) NOT NULL
                )
                "#
            }
            Backend::Sqlite => {
                r#"
                CREATE TABLE IF NOT EXISTS category (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL
                )
                "#
            }
        }
    }
}

/// Connection pool tuning.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 50,
            min_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(10 * 60)),
            max_lifetime: Some(Duration::from_secs(60 * 60)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Database {
    pool: AnyPool,
    backend: Backend,
}

impl Database {
    pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<Self> {
        let backend = Backend::from_url(database_url).ok_or_else(|| {
            StorageError::Database(sqlx::Error::Configuration(
                format!(
                    "unsupported database url scheme: {}",
                    database_url.split(':').next().unwrap_or_default()
                )
                .into(),
            ))
        })?;

        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(settings.acquire_timeout)
            .idle_timeout(settings.idle_timeout)
            .max_lifetime(settings.max_lifetime)
            .connect(database_url)
            .await?;

        tracing::debug!(?backend, "Database pool ready");

        Ok(Self { pool, backend })
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Creates the `category` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(self.backend.category_table_ddl())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Opens a transaction; waiting for a pooled connection honours `ctx`.
    pub async fn begin(&self, ctx: &RequestContext) -> Result<StoreTx<'static>> {
        let pool = &self.pool;
        ctx.run(async move { pool.begin().await.map_err(StorageError::from) })
            .await
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

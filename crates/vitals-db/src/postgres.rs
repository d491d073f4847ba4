//! PostgreSQL setup and connection helpers.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool};
use vitals_common::config::DatabaseConfig;

use crate::{DatabaseConnection, DatabaseHandle};

/// Build a pool that opens connections on first use.
///
/// Pooled connections are not tested on checkout; [`PgProbe::ping`] is the
/// only round-trip a readiness check makes.
pub fn lazy_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .test_before_acquire(false)
        .connect_lazy(&config.url)
}

/// Connection handle that defers all network I/O to [`ping`](DatabaseConnection::ping).
pub struct PgProbe {
    pool: PgPool,
}

#[async_trait]
impl DatabaseHandle for PgPool {
    /// Fails only when the pool has been closed. Reachability is left to the ping.
    async fn acquire(&self) -> Result<Box<dyn DatabaseConnection>> {
        if self.is_closed() {
            return Err(sqlx::Error::PoolClosed.into());
        }
        Ok(Box::new(PgProbe { pool: self.clone() }))
    }
}

#[async_trait]
impl DatabaseConnection for PgProbe {
    async fn ping(&mut self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        conn.ping().await?;
        Ok(())
    }
}

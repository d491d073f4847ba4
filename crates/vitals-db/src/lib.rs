//! # vitals-db
//!
//! Database connectivity for Vitals. Readiness only needs two capabilities
//! from a database: hand out a live connection, and ping it. Those are the
//! [`DatabaseHandle`] and [`DatabaseConnection`] traits; [`postgres`] provides
//! them for a sqlx `PgPool`.

pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use vitals_common::config::DatabaseConfig;

/// Something that can yield a live database connection.
#[async_trait]
pub trait DatabaseHandle: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn DatabaseConnection>>;
}

/// A live connection that can answer a connectivity probe.
#[async_trait]
pub trait DatabaseConnection: Send {
    /// One round-trip to the server.
    async fn ping(&mut self) -> Result<()>;
}

/// Shared database state, owned by the server and handed to handlers.
#[derive(Clone)]
pub struct Database {
    pub pg: PgPool,
}

impl Database {
    /// Build the PostgreSQL pool without connecting.
    ///
    /// The first connection is opened on demand, so the service can start
    /// while the database is still unreachable.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self> {
        tracing::info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Configuring PostgreSQL pool"
        );
        let pg = postgres::lazy_pool(config)?;
        Ok(Self { pg })
    }

    /// Close every pooled connection. Later acquires fail.
    pub async fn close(&self) {
        tracing::info!("Closing PostgreSQL pool");
        self.pg.close().await;
    }
}

#[async_trait]
impl DatabaseHandle for Database {
    async fn acquire(&self) -> Result<Box<dyn DatabaseConnection>> {
        DatabaseHandle::acquire(&self.pg).await
    }
}

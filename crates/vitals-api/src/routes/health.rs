//! Health check endpoints — liveness for process supervisors, readiness for
//! load balancers that should only route traffic once the database answers.
//!
//! - `GET /`      - Liveness: the process is up. Never touches the database.
//! - `GET /ready` - Readiness: a pooled connection can be acquired and pinged.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::sync::Arc;
use tracing::Span;
use vitals_common::error::{ProbeError, ProbeResult};
use vitals_db::DatabaseHandle;

/// Where the reporter writes its events. Every event is emitted as a child
/// of this span, so callers choose the target and fields it carries.
pub type LogSink = Span;

/// Body of a successful health response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            database: None,
        }
    }

    pub fn ready() -> Self {
        Self {
            status: "ready",
            database: Some("connected"),
        }
    }
}

/// Reports liveness and database readiness.
///
/// Both collaborators are shared with the rest of the process; the handler
/// never closes the database.
#[derive(Clone)]
pub struct HealthHandler {
    logger: LogSink,
    db: Arc<dyn DatabaseHandle>,
}

impl HealthHandler {
    pub fn new(logger: LogSink, db: Arc<dyn DatabaseHandle>) -> Self {
        Self { logger, db }
    }

    /// Liveness is unconditional.
    pub fn liveness(&self) -> HealthStatus {
        HealthStatus::healthy()
    }

    /// Acquire a connection and ping it. The ping is skipped if acquiring fails.
    pub async fn readiness(&self) -> ProbeResult<HealthStatus> {
        match self.probe().await {
            Ok(()) => {
                tracing::debug!(parent: &self.logger, "Database connected");
                Ok(HealthStatus::ready())
            }
            Err(e) => {
                tracing::warn!(
                    parent: &self.logger,
                    reason = %e,
                    error = ?e.backend(),
                    "Readiness check failed"
                );
                Err(e)
            }
        }
    }

    async fn probe(&self) -> ProbeResult<()> {
        let mut conn = self.db.acquire().await.map_err(ProbeError::Connection)?;
        conn.ping().await.map_err(ProbeError::Ping)
    }

    /// Mount the health routes on `api`, which is expected to be the router
    /// group nested at the health prefix.
    pub fn register(self, api: Router<HealthHandler>) -> Router {
        api.route("/", get(health))
            .route("/ready", get(ready))
            .with_state(self)
    }
}

/// Health router group, ready to be nested under a prefix.
pub fn router(handler: HealthHandler) -> Router {
    handler.register(Router::new())
}

/// GET /api/v1/health — Liveness check.
async fn health(State(handler): State<HealthHandler>) -> Json<HealthStatus> {
    Json(handler.liveness())
}

/// GET /api/v1/health/ready — Readiness check including database connectivity.
async fn ready(State(handler): State<HealthHandler>) -> ProbeResult<Json<HealthStatus>> {
    handler.readiness().await.map(Json)
}

//! # Vitals Server
//!
//! Main binary: loads configuration, prepares the PostgreSQL pool and serves
//! the health API until SIGTERM/SIGINT.

mod shutdown;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use vitals_api::{HEALTH_PREFIX, HealthHandler, build_router};
use vitals_common::config::{AppConfig, LogFormat};
use vitals_db::Database;

const DEFAULT_LOG_FILTER: &str =
    "vitals_server=debug,vitals_api=debug,vitals_db=debug,tower_http=debug";

/// Liveness and readiness endpoints backed by a PostgreSQL connectivity check.
#[derive(Debug, Parser)]
#[command(name = "vitals", version, about)]
struct Cli {
    /// Config file to load instead of ./config.toml
    #[arg(long, env = "VITALS_CONFIG")]
    config: Option<PathBuf>,

    /// Listen host, overriding `server.host`
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overriding `server.port`
    #[arg(long)]
    port: Option<u16>,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = vitals_common::config::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    // Initialize tracing (structured logging)
    init_tracing(config.log.format);

    tracing::info!("Starting Vitals v{}", env!("CARGO_PKG_VERSION"));

    // Readiness reports the database state, so the pool never blocks startup.
    let db = Database::connect_lazy(&config.database)?;

    let health = HealthHandler::new(tracing::info_span!("health"), Arc::new(db.clone()));
    let app = build_router(health);
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Health API listening on http://{addr}{HEALTH_PREFIX}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown::wait_for_signal().await;
        })
        .await?;

    db.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

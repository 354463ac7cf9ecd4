//! Startup orchestration.
//!
//! # Responsibilities
//! - Write the PID file and start the metrics exporter
//! - Build the status source and the shared evaluator
//! - Bind the listener, serve, and stop on SIGINT/SIGTERM
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The database pool connects lazily; an unreachable server shows up as
//!   failing checks, not as a failed start

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::HealthcheckConfig;
use crate::db::MySqlSource;
use crate::health::StateEvaluator;
use crate::http::HttpServer;
use crate::lifecycle::signals::wait_for_shutdown;
use crate::lifecycle::{PidFile, Shutdown};
use crate::observability::metrics;

/// Run the health checker until a shutdown signal arrives.
///
/// `config` must already be validated.
pub async fn run(config: HealthcheckConfig) -> Result<(), Box<dyn Error>> {
    // Dropped last, after the server has stopped.
    let _pid_file = match &config.pid_file {
        Some(path) => Some(PidFile::create(path)?),
        None => None,
    };

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let source = MySqlSource::from_config(&config.database)?;
    let evaluator = Arc::new(StateEvaluator::new(Arc::new(source)));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        db_host = %config.database.host,
        db_port = config.database.port,
        dsn = config.database.dsn.is_some(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, evaluator);
    let mut serve = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        signal = wait_for_shutdown() => {
            let name = signal?;
            tracing::info!(signal = name, "Shutdown signal received");
        }
        result = &mut serve => {
            match result {
                Ok(Ok(())) => tracing::info!("HTTP server exited"),
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "Serve failed");
                    return Err(e.into());
                }
                Err(e) => {
                    tracing::error!(error = %e, "Serve task failed");
                    return Err(e.into());
                }
            }
            return Ok(());
        }
    }

    shutdown.trigger();

    let grace = Duration::from_secs(config.timeouts.shutdown_secs);
    match tokio::time::timeout(grace, serve).await {
        Ok(result) => result??,
        Err(_) => tracing::warn!(grace_secs = grace.as_secs(), "Graceful shutdown timed out"),
    }

    Ok(())
}

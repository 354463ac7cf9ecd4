//! Galera node health checker.
//!
//! # Architecture Overview
//!
//! ```text
//!   Load balancer / boot probe
//!            │ GET /ready | /boot | /
//!            ▼
//!   ┌──────────────────┐     ┌──────────────────┐     ┌──────────────┐
//!   │       http       │────▶│      health      │────▶│      db      │──▶ MySQL / MariaDB
//!   │ routes + toggles │◀────│ StateEvaluator   │◀────│ StatusSource │    (Galera node)
//!   └──────────────────┘     └──────────────────┘     └──────────────┘
//!
//!   Cross-cutting: config, cli, lifecycle (pid file, signals), observability
//! ```

use clap::Parser;

use galera_health::cli::Cli;
use galera_health::config::{read_config, validate_config, ConfigError, HealthcheckConfig};
use galera_health::lifecycle::startup;
use galera_health::observability::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => HealthcheckConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        "galera-health starting"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! Command line and environment options.
//!
//! Every option also reads `GALERA_HEALTH_<NAME>` from the environment.
//! Values given here override the config file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::HealthcheckConfig;

#[derive(Debug, Parser)]
#[command(name = "galera-health")]
#[command(version, about = "Galera Healthchecker", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "GALERA_HEALTH_CONFIG")]
    pub config: Option<PathBuf>,

    /// listen host:port for http server
    #[arg(short, long, env = "GALERA_HEALTH_LISTEN")]
    pub listen: Option<String>,

    /// connection dsn (alternative to options below)
    #[arg(long, env = "GALERA_HEALTH_DSN")]
    pub dsn: Option<String>,

    /// mysql user name
    #[arg(short, long, env = "GALERA_HEALTH_USERNAME")]
    pub username: Option<String>,

    /// mysql user password
    #[arg(short, long, env = "GALERA_HEALTH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// mysql tcp host
    #[arg(short = 'H', long, env = "GALERA_HEALTH_HOST")]
    pub host: Option<String>,

    /// mysql tcp port
    #[arg(short = 'P', long, env = "GALERA_HEALTH_PORT")]
    pub port: Option<u16>,

    /// Write pid file
    #[arg(long, env = "GALERA_HEALTH_PID_FILE")]
    pub pid_file: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "GALERA_HEALTH_LOG_LEVEL", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: Option<String>,
}

impl Cli {
    /// Layer the given options over `config`.
    pub fn apply(self, config: &mut HealthcheckConfig) {
        if let Some(listen) = self.listen {
            config.listener.bind_address = normalize_listen(&listen);
        }
        if let Some(dsn) = self.dsn {
            config.database.dsn = Some(dsn);
        }
        if let Some(username) = self.username {
            config.database.username = Some(username);
        }
        if let Some(password) = self.password {
            config.database.password = Some(password);
        }
        if let Some(host) = self.host {
            config.database.host = host;
        }
        if let Some(port) = self.port {
            config.database.port = port;
        }
        if let Some(pid_file) = self.pid_file {
            config.pid_file = Some(pid_file);
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
    }
}

/// `:9200` means every interface.
fn normalize_listen(listen: &str) -> String {
    if listen.starts_with(':') {
        format!("0.0.0.0{}", listen)
    } else {
        listen.to_string()
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, value ranges and the DSN scheme
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HealthcheckConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use axum::http::StatusCode;
use thiserror::Error;

use crate::config::schema::HealthcheckConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("unknown log level {0:?}")]
    LogLevel(String),

    #[error("database.dsn must start with mysql:// or mariadb://")]
    DsnScheme,

    #[error("timeouts.request_secs ({request_secs}) must exceed twice database.query_timeout_secs ({query_timeout_secs})")]
    RequestBudget { request_secs: u64, query_timeout_secs: u64 },

    #[error("http.syncing_status {0} is not a final HTTP status (200-599)")]
    SyncingStatus(u16),
}

/// Check every semantic rule and collect all violations.
pub fn validate_config(config: &HealthcheckConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: observability.metrics_address.clone(),
        });
    }
    if !LOG_LEVELS.contains(&observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::LogLevel(observability.log_level.clone()));
    }

    let db = &config.database;
    if let Some(dsn) = db.dsn.as_deref().filter(|d| !d.is_empty()) {
        if !(dsn.starts_with("mysql://") || dsn.starts_with("mariadb://")) {
            errors.push(ValidationError::DsnScheme);
        }
    }
    if db.port == 0 {
        errors.push(ValidationError::Zero("database.port"));
    }
    if db.max_connections == 0 {
        errors.push(ValidationError::Zero("database.max_connections"));
    }
    if db.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("database.connect_timeout_secs"));
    }
    if db.query_timeout_secs == 0 {
        errors.push(ValidationError::Zero("database.query_timeout_secs"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    // A check runs up to two queries back to back.
    let request_secs = config.timeouts.request_secs;
    let query_timeout_secs = db.query_timeout_secs;
    if request_secs > 0 && query_timeout_secs > 0 && request_secs <= 2 * query_timeout_secs {
        errors.push(ValidationError::RequestBudget {
            request_secs,
            query_timeout_secs,
        });
    }
    if config.timeouts.shutdown_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.shutdown_secs"));
    }

    let syncing = config.http.syncing_status;
    if !(200..=599).contains(&syncing) || StatusCode::from_u16(syncing).is_err() {
        errors.push(ValidationError::SyncingStatus(syncing));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

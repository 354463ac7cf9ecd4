//! MySQL / MariaDB status source.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Row;

use super::{QueryError, StatusSource, StatusVariable};
use crate::config::DatabaseConfig;

/// Reads status variables over a lazily connected pool.
///
/// `SHOW` statements run over the text protocol since not every server
/// version accepts them as prepared statements.
#[derive(Debug, Clone)]
pub struct MySqlSource {
    pool: MySqlPool,
    query_timeout: Duration,
}

impl MySqlSource {
    /// Build the pool from configuration. No connection is opened yet.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = connect_options(config)?;
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_lazy_with(options);

        Ok(Self::new(pool, Duration::from_secs(config.query_timeout_secs)))
    }

    pub fn new(pool: MySqlPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

fn connect_options(config: &DatabaseConfig) -> Result<MySqlConnectOptions, sqlx::Error> {
    if let Some(dsn) = config.dsn.as_deref().filter(|d| !d.is_empty()) {
        return dsn.parse::<MySqlConnectOptions>();
    }

    let mut options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port);
    if let Some(user) = config.username.as_deref() {
        options = options.username(user);
    }
    if let Some(password) = config.password.as_deref() {
        options = options.password(password);
    }
    Ok(options)
}

/// An empty result (e.g. no wsrep provider loaded) is `NoRows`, not a driver error.
fn map_fetch<R>(result: Result<R, sqlx::Error>, variable: StatusVariable) -> Result<R, QueryError> {
    match result {
        Ok(row) => Ok(row),
        Err(sqlx::Error::RowNotFound) => Err(QueryError::NoRows(variable)),
        Err(source) => Err(QueryError::Database { variable, source }),
    }
}

#[async_trait]
impl StatusSource for MySqlSource {
    async fn query(&self, variable: StatusVariable) -> Result<String, QueryError> {
        let fetch = sqlx::raw_sql(variable.statement()).fetch_one(&self.pool);

        let row = match tokio::time::timeout(self.query_timeout, fetch).await {
            Ok(result) => map_fetch(result, variable)?,
            Err(_) => return Err(QueryError::Timeout(variable, self.query_timeout)),
        };

        let value: String = row
            .try_get(1)
            .map_err(|source| QueryError::Database { variable, source })?;

        tracing::trace!(variable = %variable, value = %value, "Status variable fetched");
        Ok(value)
    }
}

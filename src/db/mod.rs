//! Status variable sources.
//!
//! The evaluator reads two values from the database engine:
//!
//! - `wsrep_local_state` via `SHOW STATUS LIKE 'wsrep_local_state'`
//! - `read_only` via `SHOW GLOBAL VARIABLES LIKE 'read_only'`
//!
//! [`mysql::MySqlSource`] talks to the server through a sqlx pool.
//! [`fixed::FixedSource`] serves values from memory and backs the tests.

pub mod fixed;
pub mod mysql;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use fixed::FixedSource;
pub use mysql::MySqlSource;

/// The variables the evaluator knows how to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusVariable {
    WsrepLocalState,
    ReadOnly,
}

impl StatusVariable {
    pub fn name(&self) -> &'static str {
        match self {
            StatusVariable::WsrepLocalState => "wsrep_local_state",
            StatusVariable::ReadOnly => "read_only",
        }
    }

    /// Statement returning a single `(Variable_name, Value)` row.
    pub fn statement(&self) -> &'static str {
        match self {
            StatusVariable::WsrepLocalState => "SHOW STATUS LIKE 'wsrep_local_state'",
            StatusVariable::ReadOnly => "SHOW GLOBAL VARIABLES LIKE 'read_only'",
        }
    }
}

impl fmt::Display for StatusVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from a status variable lookup.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The driver reported an error.
    #[error("query for {variable} failed: {source}")]
    Database {
        variable: StatusVariable,
        #[source]
        source: sqlx::Error,
    },

    /// The statement succeeded but returned nothing.
    #[error("no row returned for {0}")]
    NoRows(StatusVariable),

    /// The lookup did not finish before its deadline.
    #[error("query for {0} timed out after {1:?}")]
    Timeout(StatusVariable, Duration),

    /// The source could not serve the lookup.
    #[error("{variable} unavailable: {message}")]
    Unavailable {
        variable: StatusVariable,
        message: String,
    },
}

/// A synchronous request/response lookup of one status variable.
///
/// One call is one round trip. Implementations own their own pooling and
/// deadlines; callers never retry.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn query(&self, variable: StatusVariable) -> Result<String, QueryError>;
}

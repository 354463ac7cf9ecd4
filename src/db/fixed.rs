//! In-memory status source.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{QueryError, StatusSource, StatusVariable};

#[derive(Debug, Clone)]
enum Entry {
    Value(String),
    Fail(String),
}

/// A source serving values set by the caller.
///
/// Values can be changed between checks to walk a node through its states.
/// Unset variables answer with [`QueryError::NoRows`].
#[derive(Debug, Default)]
pub struct FixedSource {
    entries: Mutex<HashMap<StatusVariable, Entry>>,
    delay: Mutex<Option<Duration>>,
    state_queries: AtomicUsize,
    read_only_queries: AtomicUsize,
}

impl FixedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source reporting the given `wsrep_local_state` and `read_only` values.
    pub fn with_values(state: &str, read_only: &str) -> Self {
        let source = Self::new();
        source.set(StatusVariable::WsrepLocalState, state);
        source.set(StatusVariable::ReadOnly, read_only);
        source
    }

    pub fn set(&self, variable: StatusVariable, value: &str) {
        self.lock().insert(variable, Entry::Value(value.to_string()));
    }

    /// Make every lookup of `variable` fail until it is set again.
    pub fn fail(&self, variable: StatusVariable, message: &str) {
        self.lock().insert(variable, Entry::Fail(message.to_string()));
    }

    /// Delay every answer, simulating a slow server.
    pub fn set_delay(&self, delay: Option<Duration>) {
        if let Ok(mut guard) = self.delay.lock() {
            *guard = delay;
        }
    }

    /// Number of completed or attempted lookups of `variable`.
    pub fn queries(&self, variable: StatusVariable) -> usize {
        match variable {
            StatusVariable::WsrepLocalState => self.state_queries.load(Ordering::SeqCst),
            StatusVariable::ReadOnly => self.read_only_queries.load(Ordering::SeqCst),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<StatusVariable, Entry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl StatusSource for FixedSource {
    async fn query(&self, variable: StatusVariable) -> Result<String, QueryError> {
        match variable {
            StatusVariable::WsrepLocalState => self.state_queries.fetch_add(1, Ordering::SeqCst),
            StatusVariable::ReadOnly => self.read_only_queries.fetch_add(1, Ordering::SeqCst),
        };

        let delay = self.delay.lock().ok().and_then(|d| *d);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let entry = self.lock().get(&variable).cloned();
        match entry {
            Some(Entry::Value(value)) => Ok(value),
            Some(Entry::Fail(message)) => Err(QueryError::Unavailable { variable, message }),
            None => Err(QueryError::NoRows(variable)),
        }
    }
}

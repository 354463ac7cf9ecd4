//! Serialized node state evaluator.
//!
//! # Responsibilities
//! - Fetch `wsrep_local_state` and, when needed, `read_only`
//! - Classify the node and carry state between checks
//!
//! # Design Decisions
//! - The state lock is held for the whole check, queries included
//! - State is committed only after every query succeeded; a failed or
//!   cancelled check leaves it untouched
//! - No retries; a failed lookup is the caller's answer

use std::sync::Arc;

use tokio::sync::Mutex;

use super::state::{EvaluatorState, ReplicationState};
use super::verdict::{apply_read_only, classify, PolicyToggles, Step, Verdict};
use crate::db::{QueryError, StatusSource, StatusVariable};
use crate::observability::metrics;

/// Turns the node's replication status into a health verdict.
pub struct StateEvaluator {
    source: Arc<dyn StatusSource>,
    state: Mutex<EvaluatorState>,
}

impl StateEvaluator {
    pub fn new(source: Arc<dyn StatusSource>) -> Self {
        Self {
            source,
            state: Mutex::new(EvaluatorState::new()),
        }
    }

    /// Run one health check.
    ///
    /// Concurrent callers queue on the state lock. Dropping the returned
    /// future cancels the check without touching state.
    pub async fn check(&self, toggles: PolicyToggles) -> Result<Verdict, QueryError> {
        let mut state = self.state.lock().await;

        let raw = self.source.query(StatusVariable::WsrepLocalState).await?;
        let current = ReplicationState::parse(&raw);
        metrics::record_replication_state(&current);

        let (step, latch) = classify(&current, &state, toggles);
        let verdict = match step {
            Step::Done(verdict) => verdict,
            Step::CheckReadOnly => {
                let read_only = self.source.query(StatusVariable::ReadOnly).await?;
                apply_read_only(read_only.trim())
            }
        };

        tracing::debug!(
            state = %current,
            previous = %state.previous(),
            ever_joined = state.ever_joined(),
            donor_ok = toggles.available_when_donor,
            readonly_ok = toggles.available_when_read_only,
            healthy = verdict.healthy(),
            reason = %verdict.reason(),
            "Node state evaluated"
        );

        let previous = state.previous().clone();
        if state.advance(current.clone(), latch) {
            tracing::info!(
                state = %current,
                previous = %previous,
                "Node has joined the cluster; initial sync phase is over"
            );
        }

        Ok(verdict)
    }

    /// Copy of the carried state.
    pub async fn snapshot(&self) -> EvaluatorState {
        self.state.lock().await.clone()
    }
}

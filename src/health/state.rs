//! Replication state machine.
//!
//! # States (`wsrep_local_state`)
//! ```text
//! 0 Initial         no observation yet (process start)
//! 1 Joining         requesting a state transfer
//! 2 DonorDesynced   serving a state transfer, temporarily desynced
//! 3 Joined          full state received, not yet serving
//! 4 Synced          caught up and serving
//! ```
//!
//! Any other value is kept as `Unrecognized` and classified as "not synced".

use std::fmt;

/// Replication position reported by the engine for this node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReplicationState {
    #[default]
    Initial,
    Joining,
    DonorDesynced,
    Joined,
    Synced,
    Unrecognized(String),
}

impl ReplicationState {
    /// Parse the string value of `wsrep_local_state`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "0" => ReplicationState::Initial,
            "1" => ReplicationState::Joining,
            "2" => ReplicationState::DonorDesynced,
            "3" => ReplicationState::Joined,
            "4" => ReplicationState::Synced,
            other => ReplicationState::Unrecognized(other.to_string()),
        }
    }

    /// Numeric code, if the state is one the engine documents.
    pub fn code(&self) -> Option<u8> {
        match self {
            ReplicationState::Initial => Some(0),
            ReplicationState::Joining => Some(1),
            ReplicationState::DonorDesynced => Some(2),
            ReplicationState::Joined => Some(3),
            ReplicationState::Synced => Some(4),
            ReplicationState::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for ReplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplicationState::Initial => write!(f, "initial"),
            ReplicationState::Joining => write!(f, "joining"),
            ReplicationState::DonorDesynced => write!(f, "donor/desynced"),
            ReplicationState::Joined => write!(f, "joined"),
            ReplicationState::Synced => write!(f, "synced"),
            ReplicationState::Unrecognized(raw) => write!(f, "unrecognized({})", raw),
        }
    }
}

/// One-way flag recording that the node has left the initial sync phase.
///
/// There is deliberately no way to clear it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoinLatch(bool);

impl JoinLatch {
    pub fn set(&mut self) {
        self.0 = true;
    }

    pub fn is_set(&self) -> bool {
        self.0
    }
}

/// Memory carried by the evaluator from one check to the next.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvaluatorState {
    previous: ReplicationState,
    ever_joined: JoinLatch,
}

impl EvaluatorState {
    /// Fresh state: no observation, latch unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// The state observed by the last successful check.
    pub fn previous(&self) -> &ReplicationState {
        &self.previous
    }

    pub fn ever_joined(&self) -> bool {
        self.ever_joined.is_set()
    }

    /// Record the outcome of a completed check.
    ///
    /// Returns true when this call flipped the latch.
    pub(crate) fn advance(&mut self, current: ReplicationState, latch: bool) -> bool {
        let flipped = latch && !self.ever_joined.is_set();
        if latch {
            self.ever_joined.set();
        }
        self.previous = current;
        flipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_codes() {
        assert_eq!(ReplicationState::parse("0"), ReplicationState::Initial);
        assert_eq!(ReplicationState::parse("1"), ReplicationState::Joining);
        assert_eq!(ReplicationState::parse("2"), ReplicationState::DonorDesynced);
        assert_eq!(ReplicationState::parse("3"), ReplicationState::Joined);
        assert_eq!(ReplicationState::parse(" 4\n"), ReplicationState::Synced);
    }

    #[test]
    fn test_parse_unrecognized() {
        let state = ReplicationState::parse("5");
        assert_eq!(state, ReplicationState::Unrecognized("5".into()));
        assert_eq!(state.code(), None);
        assert_eq!(ReplicationState::parse("").code(), None);
    }

    #[test]
    fn test_latch_is_monotonic() {
        let mut state = EvaluatorState::new();
        assert!(!state.ever_joined());

        assert!(state.advance(ReplicationState::Synced, true));
        assert!(state.ever_joined());

        // Re-setting is a no-op, and not latching never clears it.
        assert!(!state.advance(ReplicationState::Synced, true));
        assert!(!state.advance(ReplicationState::Joining, false));
        assert!(state.ever_joined());
        assert_eq!(state.previous(), &ReplicationState::Joining);
    }
}

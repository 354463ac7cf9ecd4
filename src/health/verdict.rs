//! Verdict types and the classification rules.
//!
//! # Precedence
//! ```text
//! state != Synced && !ever_joined:
//!     previous == Joined && state != Joined → "no synced" (sets latch)
//!     otherwise                             → "syncing"
//! state == Synced || (state == DonorDesynced && donor allowed):
//!     sets latch; "synced", or "read-only" if read_only=ON and not allowed
//! anything else                             → "not synced"
//! ```

use std::fmt;

use super::state::{EvaluatorState, ReplicationState};

/// Why a node is (or is not) available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    NotSynced,
    Syncing,
    /// Regression out of Joined before ever reaching Synced.
    ///
    /// The wording is part of the response contract; clients match on it.
    NoSynced,
    Synced,
    ReadOnly,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::NotSynced => "not synced",
            Reason::Syncing => "syncing",
            Reason::NoSynced => "no synced",
            Reason::Synced => "synced",
            Reason::ReadOnly => "read-only",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    reason: Reason,
}

impl Verdict {
    pub fn new(reason: Reason) -> Self {
        Self { reason }
    }

    /// Healthy if and only if the reason is `synced`.
    pub fn healthy(&self) -> bool {
        self.reason == Reason::Synced
    }

    pub fn reason(&self) -> Reason {
        self.reason
    }
}

/// Per-request policy switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolicyToggles {
    /// Treat a donor/desynced node as available.
    pub available_when_donor: bool,
    /// Skip the read_only lookup entirely.
    pub available_when_read_only: bool,
}

impl PolicyToggles {
    /// Load balancer readiness probe.
    pub const READY: PolicyToggles = PolicyToggles {
        available_when_donor: false,
        available_when_read_only: false,
    };

    /// Startup gate: any node that has state is good enough.
    pub const BOOT: PolicyToggles = PolicyToggles {
        available_when_donor: true,
        available_when_read_only: true,
    };

    pub const DEFAULT: PolicyToggles = PolicyToggles::READY;
}

/// Outcome of classifying the replication state alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Final verdict, no further lookups.
    Done(Verdict),
    /// Provisionally synced; `read_only` decides.
    CheckReadOnly,
}

/// Classify `current` against the carried state.
///
/// The boolean is true when the check must set the join latch.
pub(crate) fn classify(
    current: &ReplicationState,
    state: &EvaluatorState,
    toggles: PolicyToggles,
) -> (Step, bool) {
    if *current != ReplicationState::Synced && !state.ever_joined() {
        if *state.previous() == ReplicationState::Joined && *current != ReplicationState::Joined {
            return (Step::Done(Verdict::new(Reason::NoSynced)), true);
        }
        return (Step::Done(Verdict::new(Reason::Syncing)), false);
    }

    let donor_ok =
        *current == ReplicationState::DonorDesynced && toggles.available_when_donor;
    if *current == ReplicationState::Synced || donor_ok {
        if toggles.available_when_read_only {
            return (Step::Done(Verdict::new(Reason::Synced)), true);
        }
        return (Step::CheckReadOnly, true);
    }

    // Reachable once the latch is set: e.g. a synced node falling back to joining.
    (Step::Done(Verdict::new(Reason::NotSynced)), false)
}

/// Final verdict for a provisionally synced node given the `read_only` value.
pub(crate) fn apply_read_only(value: &str) -> Verdict {
    match value {
        "ON" => Verdict::new(Reason::ReadOnly),
        _ => Verdict::new(Reason::Synced),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TOGGLES: [PolicyToggles; 4] = [
        PolicyToggles { available_when_donor: false, available_when_read_only: false },
        PolicyToggles { available_when_donor: false, available_when_read_only: true },
        PolicyToggles { available_when_donor: true, available_when_read_only: false },
        PolicyToggles { available_when_donor: true, available_when_read_only: true },
    ];

    fn latched(previous: ReplicationState) -> EvaluatorState {
        let mut state = EvaluatorState::new();
        state.advance(previous, true);
        state
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(Reason::NotSynced.to_string(), "not synced");
        assert_eq!(Reason::Syncing.to_string(), "syncing");
        assert_eq!(Reason::NoSynced.to_string(), "no synced");
        assert_eq!(Reason::Synced.to_string(), "synced");
        assert_eq!(Reason::ReadOnly.to_string(), "read-only");
    }

    #[test]
    fn test_healthy_only_when_synced() {
        for reason in [Reason::NotSynced, Reason::Syncing, Reason::NoSynced, Reason::ReadOnly] {
            assert!(!Verdict::new(reason).healthy());
        }
        assert!(Verdict::new(Reason::Synced).healthy());
    }

    #[test]
    fn test_unsynced_before_join_is_syncing() {
        let fresh = EvaluatorState::new();
        let states = [
            ReplicationState::Initial,
            ReplicationState::Joining,
            ReplicationState::DonorDesynced,
            ReplicationState::Joined,
            ReplicationState::Unrecognized("9".into()),
        ];
        for current in &states {
            for toggles in ALL_TOGGLES {
                let (step, latch) = classify(current, &fresh, toggles);
                assert_eq!(step, Step::Done(Verdict::new(Reason::Syncing)), "{current}");
                assert!(!latch);
            }
        }
    }

    #[test]
    fn test_joined_regression_latches() {
        let mut state = EvaluatorState::new();
        state.advance(ReplicationState::Joined, false);

        for current in [ReplicationState::Joining, ReplicationState::DonorDesynced] {
            let (step, latch) = classify(&current, &state, PolicyToggles::BOOT);
            assert_eq!(step, Step::Done(Verdict::new(Reason::NoSynced)));
            assert!(latch);
        }

        // Staying in Joined is still syncing.
        let (step, latch) = classify(&ReplicationState::Joined, &state, PolicyToggles::READY);
        assert_eq!(step, Step::Done(Verdict::new(Reason::Syncing)));
        assert!(!latch);
    }

    #[test]
    fn test_synced_consults_read_only_unless_allowed() {
        let fresh = EvaluatorState::new();
        let (step, latch) = classify(&ReplicationState::Synced, &fresh, PolicyToggles::READY);
        assert_eq!(step, Step::CheckReadOnly);
        assert!(latch);

        let (step, latch) = classify(&ReplicationState::Synced, &fresh, PolicyToggles::BOOT);
        assert_eq!(step, Step::Done(Verdict::new(Reason::Synced)));
        assert!(latch);
    }

    #[test]
    fn test_donor_requires_toggle() {
        let state = latched(ReplicationState::Synced);

        let no_donor = PolicyToggles { available_when_donor: false, available_when_read_only: true };
        let (step, latch) = classify(&ReplicationState::DonorDesynced, &state, no_donor);
        assert_eq!(step, Step::Done(Verdict::new(Reason::NotSynced)));
        assert!(!latch);

        let donor = PolicyToggles { available_when_donor: true, available_when_read_only: false };
        let (step, latch) = classify(&ReplicationState::DonorDesynced, &state, donor);
        assert_eq!(step, Step::CheckReadOnly);
        assert!(latch);
    }

    #[test]
    fn test_default_branch_after_latch() {
        let state = latched(ReplicationState::Synced);
        for current in [
            ReplicationState::Initial,
            ReplicationState::Joining,
            ReplicationState::Joined,
            ReplicationState::Unrecognized("7".into()),
        ] {
            for toggles in ALL_TOGGLES {
                let (step, latch) = classify(&current, &state, toggles);
                assert_eq!(step, Step::Done(Verdict::new(Reason::NotSynced)), "{current}");
                assert!(!latch);
            }
        }
    }

    #[test]
    fn test_read_only_value() {
        assert_eq!(apply_read_only("ON").reason(), Reason::ReadOnly);
        assert_eq!(apply_read_only("OFF").reason(), Reason::Synced);
        assert_eq!(apply_read_only("on").reason(), Reason::Synced);
        assert_eq!(apply_read_only("").reason(), Reason::Synced);
    }
}

//! Node health evaluation subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP probe (/ready, /boot, /)
//!     → PolicyToggles (route defaults + query overrides)
//!     → evaluator.rs (serialized check)
//!         → StatusSource: wsrep_local_state
//!         → verdict.rs classify()
//!         → StatusSource: read_only (only when it can change the outcome)
//!     → Verdict (healthy, reason)
//!
//! State machine (state.rs):
//!     previous ReplicationState + sticky JoinLatch
//!     committed only after every query of a check succeeded
//! ```
//!
//! # Design Decisions
//! - One evaluator per process, shared via Arc
//! - Checks are serialized by an async mutex held across both queries
//! - The join latch only ever goes false → true

pub mod evaluator;
pub mod state;
pub mod verdict;

pub use evaluator::StateEvaluator;
pub use state::{EvaluatorState, JoinLatch, ReplicationState};
pub use verdict::{PolicyToggles, Reason, Verdict};

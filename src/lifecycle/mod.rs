//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Logging → PID file → Metrics → DB pool → Listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight checks → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Shutdown has timeout: forced exit after deadline
//! - The PID file is removed last, after the server stopped

pub mod pidfile;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use pidfile::PidFile;
pub use shutdown::Shutdown;

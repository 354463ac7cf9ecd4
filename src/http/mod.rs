//! HTTP probe surface.
//!
//! # Data Flow
//! ```text
//! GET /ready | /boot | / (any path)
//!     → server.rs (Axum setup, middleware)
//!     → handlers.rs (route defaults + ?donor_ok / ?readonly_ok)
//!     → StateEvaluator::check
//!     → response.rs (status code + plain text body)
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};

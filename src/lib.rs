//! Galera node health checker library.

pub mod cli;
pub mod config;
pub mod db;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::HealthcheckConfig;
pub use health::{PolicyToggles, StateEvaluator, Verdict};
pub use http::HttpServer;
pub use lifecycle::Shutdown;

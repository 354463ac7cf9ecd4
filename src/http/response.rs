//! Verdict to HTTP response mapping.
//!
//! ```text
//! healthy              → 200
//! reason == "syncing"  → configured syncing status
//! other unhealthy      → 503
//! QueryError           → 500 (cannot read the node at all)
//! bad query options    → 400 (evaluator not invoked)
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::QueryError;
use crate::health::{Reason, Verdict};

pub const STATUS_PREFIX: &str = "Galera Cluster Node status: ";

/// Status code for a verdict.
pub fn verdict_status(verdict: &Verdict, syncing_status: StatusCode) -> StatusCode {
    if verdict.reason() == Reason::Syncing {
        syncing_status
    } else if verdict.healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

pub fn verdict_response(verdict: &Verdict, syncing_status: StatusCode) -> Response {
    let body = format!("{}{}", STATUS_PREFIX, verdict.reason());
    (verdict_status(verdict, syncing_status), body).into_response()
}

pub fn query_failure_response(err: &QueryError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Query failed: {}", err),
    )
        .into_response()
}

pub fn bad_options_response<E: std::fmt::Display>(errors: &[E]) -> Response {
    let listed = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    (
        StatusCode::BAD_REQUEST,
        format!("Failed to parse query opts:\n\n{}\n", listed),
    )
        .into_response()
}

//! Metrics collection and exposition.
//!
//! # Metrics
//! - `galera_health_checks_total` (counter): verdicts by route, reason
//! - `galera_health_query_failures_total` (counter): failed checks by route
//! - `galera_health_check_duration_seconds` (histogram): check latency
//! - `galera_health_wsrep_local_state` (gauge): last observed state code, -1 if unrecognized
//!
//! Without an installed exporter every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::health::{ReplicationState, Verdict};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_verdict(route: &'static str, verdict: &Verdict, start: Instant) {
    counter!(
        "galera_health_checks_total",
        "route" => route,
        "reason" => verdict.reason().as_str()
    )
    .increment(1);
    histogram!("galera_health_check_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_query_failure(route: &'static str, start: Instant) {
    counter!("galera_health_query_failures_total", "route" => route).increment(1);
    histogram!("galera_health_check_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_replication_state(state: &ReplicationState) {
    let code = state.code().map(f64::from).unwrap_or(-1.0);
    gauge!("galera_health_wsrep_local_state").set(code);
}

//! Probe handlers.
//!
//! Each route carries its own default [`PolicyToggles`]; `?donor_ok` and
//! `?readonly_ok` override them per request. A bare key means `true`.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::{get, MethodRouter};
use thiserror::Error;

use crate::health::PolicyToggles;
use crate::http::response::{bad_options_response, query_failure_response, verdict_response};
use crate::http::server::AppState;
use crate::observability::metrics;

pub const DONOR_OK: &str = "donor_ok";
pub const READONLY_OK: &str = "readonly_ok";

/// A query option that is not a boolean literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{key}: parsing {value:?}: invalid syntax")]
pub struct ToggleError {
    pub key: String,
    pub value: String,
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn query_bool(params: &[(String, String)], key: &str, default: bool) -> Result<bool, ToggleError> {
    let Some((_, value)) = params.iter().find(|(k, _)| k == key) else {
        return Ok(default);
    };
    if value.is_empty() {
        return Ok(true);
    }
    parse_bool(value).ok_or_else(|| ToggleError {
        key: key.to_string(),
        value: value.clone(),
    })
}

/// Apply query overrides to route defaults, reporting every bad option.
pub fn parse_toggles(
    params: &[(String, String)],
    defaults: PolicyToggles,
) -> Result<PolicyToggles, Vec<ToggleError>> {
    let donor = query_bool(params, DONOR_OK, defaults.available_when_donor);
    let read_only = query_bool(params, READONLY_OK, defaults.available_when_read_only);

    match (donor, read_only) {
        (Ok(available_when_donor), Ok(available_when_read_only)) => Ok(PolicyToggles {
            available_when_donor,
            available_when_read_only,
        }),
        (donor, read_only) => Err([donor.err(), read_only.err()].into_iter().flatten().collect()),
    }
}

/// GET handler for one probe route.
pub fn probe(route: &'static str, defaults: PolicyToggles) -> MethodRouter<AppState> {
    get(
        move |State(state): State<AppState>, Query(params): Query<Vec<(String, String)>>| {
            handle_probe(state, params, route, defaults)
        },
    )
}

async fn handle_probe(
    state: AppState,
    params: Vec<(String, String)>,
    route: &'static str,
    defaults: PolicyToggles,
) -> Response {
    let start = Instant::now();

    let toggles = match parse_toggles(&params, defaults) {
        Ok(toggles) => toggles,
        Err(errors) => {
            tracing::error!(route, errors = ?errors, "Failed to parse query opts");
            return bad_options_response(&errors);
        }
    };

    match state.evaluator.check(toggles).await {
        Ok(verdict) => {
            metrics::record_verdict(route, &verdict, start);
            verdict_response(&verdict, state.syncing_status)
        }
        Err(e) => {
            tracing::error!(route, error = %e, "Query failed");
            metrics::record_query_failure(route, start);
            query_failure_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(parse_toggles(&[], PolicyToggles::BOOT), Ok(PolicyToggles::BOOT));
        assert_eq!(
            parse_toggles(&params(&[("other", "x")]), PolicyToggles::READY),
            Ok(PolicyToggles::READY)
        );
    }

    #[test]
    fn test_bare_key_means_true() {
        let toggles = parse_toggles(&params(&[("donor_ok", "")]), PolicyToggles::READY).unwrap();
        assert!(toggles.available_when_donor);
        assert!(!toggles.available_when_read_only);
    }

    #[test]
    fn test_explicit_values_override() {
        let toggles = parse_toggles(
            &params(&[("donor_ok", "False"), ("readonly_ok", "0")]),
            PolicyToggles::BOOT,
        )
        .unwrap();
        assert_eq!(toggles, PolicyToggles::READY);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let toggles = parse_toggles(
            &params(&[("readonly_ok", "t"), ("readonly_ok", "f")]),
            PolicyToggles::READY,
        )
        .unwrap();
        assert!(toggles.available_when_read_only);
    }

    #[test]
    fn test_reports_every_bad_option() {
        let errors = parse_toggles(
            &params(&[("donor_ok", "yes"), ("readonly_ok", "2")]),
            PolicyToggles::READY,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].to_string(), "donor_ok: parsing \"yes\": invalid syntax");
        assert_eq!(errors[1].key, "readonly_ok");
    }

    #[test]
    fn test_parse_bool_literals() {
        for v in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(v), Some(true), "{v}");
        }
        for v in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(v), Some(false), "{v}");
        }
        for v in ["yes", "on", "tRuE", " 1"] {
            assert_eq!(parse_bool(v), None, "{v}");
        }
    }
}

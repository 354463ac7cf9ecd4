//! Server start/stop behaviour and the real database source.

use std::sync::Arc;
use std::time::Duration;

use galera_health::config::DatabaseConfig;
use galera_health::db::{FixedSource, MySqlSource};
use galera_health::HealthcheckConfig;

mod common;

#[tokio::test]
async fn test_graceful_shutdown_stops_server() {
    let source = Arc::new(FixedSource::with_values("4", "OFF"));
    let checker = common::start_checker(source, HealthcheckConfig::default()).await;

    let (status, _) = common::probe(&checker, "/ready").await;
    assert_eq!(status, 200);

    checker.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), checker.handle)
        .await
        .expect("server did not stop");
    assert!(result.unwrap().is_ok());

    let refused = common::client()
        .get(format!("http://{}/ready", checker.addr))
        .send()
        .await;
    assert!(refused.is_err());
}

#[tokio::test]
async fn test_unreachable_database_is_a_query_failure() {
    let database = DatabaseConfig {
        host: "127.0.0.1".into(),
        port: 1,
        connect_timeout_secs: 1,
        query_timeout_secs: 2,
        ..DatabaseConfig::default()
    };
    let source = Arc::new(MySqlSource::from_config(&database).unwrap());
    let checker = common::start_checker(source, HealthcheckConfig::default()).await;

    let (status, body) = common::probe(&checker, "/ready").await;
    assert_eq!(status, 500);
    assert!(body.starts_with("Query failed: "), "{body}");

    checker.shutdown.trigger();
}

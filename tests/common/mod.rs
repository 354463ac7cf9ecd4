//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use galera_health::db::StatusSource;
use galera_health::{HealthcheckConfig, HttpServer, Shutdown, StateEvaluator};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running checker on an ephemeral local port.
pub struct Checker {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    #[allow(dead_code)]
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl Checker {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the HTTP server around `source` with the given config.
pub async fn start_checker(source: Arc<dyn StatusSource>, config: HealthcheckConfig) -> Checker {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let evaluator = Arc::new(StateEvaluator::new(source));
    let server = HttpServer::new(&config, evaluator);
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    Checker {
        addr,
        shutdown,
        handle,
    }
}

/// Client that never pools, so shutdown tests are not kept alive by idle connections.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// GET `path` and return status code and body.
#[allow(dead_code)]
pub async fn probe(checker: &Checker, path: &str) -> (u16, String) {
    let res = client()
        .get(checker.url(path))
        .send()
        .await
        .expect("Checker unreachable");
    let status = res.status().as_u16();
    (status, res.text().await.unwrap())
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the probe routes
//! - Wire up middleware (tracing, request deadline, request ID)
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::HealthcheckConfig;
use crate::health::{PolicyToggles, StateEvaluator};
use crate::http::handlers::probe;
use crate::lifecycle::shutdown::notified;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<StateEvaluator>,
    pub syncing_status: StatusCode,
}

/// HTTP front of the health checker.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around a shared evaluator.
    pub fn new(config: &HealthcheckConfig, evaluator: Arc<StateEvaluator>) -> Self {
        let syncing_status = StatusCode::from_u16(config.http.syncing_status)
            .unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
        let state = AppState {
            evaluator,
            syncing_status,
        };

        let router = Self::build_router(Duration::from_secs(config.timeouts.request_secs), state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// A blown request deadline is a server-side failure (504), never a
    /// verdict and never a client error.
    fn build_router(request_timeout: Duration, state: AppState) -> Router {
        Router::new()
            // load balancer readiness
            .route("/ready", probe("ready", PolicyToggles::READY))
            // boot health gate
            .route("/boot", probe("boot", PolicyToggles::BOOT))
            .route("/", probe("default", PolicyToggles::DEFAULT))
            .route("/{*path}", probe("default", PolicyToggles::DEFAULT))
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(notified(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

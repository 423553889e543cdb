//! HTTP server setup and lifecycle coordination.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (request records, timeout, trace)
//! - Serve on an independent task while the main control path waits for a
//!   termination signal
//! - Coordinate graceful shutdown: stop accepting, drain in-flight work for
//!   a bounded grace period, then force-terminate

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{GatewayConfig, UpgradeConfig};
use crate::error::GatewayError;
use crate::http::{handlers, middleware, websocket};
use crate::lifecycle::{signals, Lifecycle, LifecycleState, Shutdown};
use crate::observability::EventSink;
use crate::store::EntityStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub events: Arc<dyn EventSink>,
    pub upgrade: UpgradeConfig,
    pub lifecycle: watch::Receiver<LifecycleState>,
    pub shutdown: Arc<Shutdown>,
}

/// HTTP server for the gateway; owns the lifecycle state machine.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    lifecycle: Lifecycle,
    shutdown: Arc<Shutdown>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and capabilities.
    pub fn new(
        config: GatewayConfig,
        store: Arc<dyn EntityStore>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let lifecycle = Lifecycle::new();
        let shutdown = Arc::new(Shutdown::new());

        let state = AppState {
            store,
            events,
            upgrade: config.upgrade.clone(),
            lifecycle: lifecycle.watch(),
            shutdown: shutdown.clone(),
        };

        let router = Self::build_router(&config, state);

        Self {
            router,
            config,
            lifecycle,
            shutdown,
        }
    }

    /// Build the Axum router: exact method + path dispatch, unmatched
    /// requests fall through to axum's 404.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/v1/users/{id}", get(handlers::get_user))
            .route("/api/v1/users", post(handlers::create_user))
            .route("/ws", get(websocket::ws_handler))
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::request_log,
            ))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Handle for requesting shutdown programmatically (tests, embedding).
    pub fn shutdown_handle(&self) -> Arc<Shutdown> {
        self.shutdown.clone()
    }

    /// Observe lifecycle state transitions.
    pub fn lifecycle_watch(&self) -> watch::Receiver<LifecycleState> {
        self.lifecycle.watch()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Run the server on a bound listener until a termination signal (or a
    /// programmatic shutdown request) arrives, then drain within the grace
    /// period. An accept-loop failure is fatal and returned as an error.
    pub async fn run(self, listener: TcpListener) -> Result<(), GatewayError> {
        let addr = listener.local_addr().map_err(GatewayError::Serve)?;
        tracing::info!(address = %addr, "HTTP server starting");

        self.lifecycle.advance(LifecycleState::Running);

        let mut drain_rx = self.shutdown.subscribe();
        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        let mut serve_task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = drain_rx.recv().await;
                })
                .await
        });

        // Block the main control path until something ends the Running state.
        let mut term_rx = self.shutdown.subscribe();
        tokio::select! {
            result = &mut serve_task => {
                // A shutdown request may drain so fast that the serve task
                // finishes before we observe the trigger; that is not a failure.
                let intentional = self.shutdown.is_triggered();
                self.lifecycle.advance(LifecycleState::Stopped);
                return match result {
                    Ok(Ok(())) if intentional => Ok(()),
                    other => Err(serve_failure(other)),
                };
            }
            _ = signals::wait_for_terminate() => {}
            _ = term_rx.recv() => {
                tracing::info!("shutdown requested");
            }
        }

        self.lifecycle.advance(LifecycleState::Draining);
        self.shutdown.trigger();

        let grace = Duration::from_secs(self.config.shutdown.grace_period_secs);
        match tokio::time::timeout(grace, &mut serve_task).await {
            Ok(Ok(Ok(()))) => {
                tracing::info!("in-flight work drained");
            }
            Ok(Ok(Err(e))) => {
                tracing::error!(error = %e, "server error while draining");
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "serve task failed while draining");
            }
            Err(_) => {
                serve_task.abort();
                tracing::warn!(
                    grace_period_secs = grace.as_secs(),
                    "grace period exceeded, forcing shutdown"
                );
            }
        }

        self.lifecycle.advance(LifecycleState::Stopped);
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Map an unexpected accept-loop exit to a fatal error.
fn serve_failure(
    result: Result<Result<(), std::io::Error>, tokio::task::JoinError>,
) -> GatewayError {
    match result {
        Ok(Ok(())) => GatewayError::Serve(std::io::Error::other(
            "accept loop exited without a shutdown request",
        )),
        Ok(Err(e)) => GatewayError::Serve(e),
        Err(e) => GatewayError::Serve(std::io::Error::other(e)),
    }
}

//! WebSocket upgrade gateway.
//!
//! # Responsibilities
//! - Enforce the origin policy before the handshake
//! - Refuse upgrades once the server is draining
//! - On success, construct a session and spawn its receive loop;
//!   the HTTP handler returns without waiting for the session
//!
//! On negotiation failure no session is constructed and nothing leaks; the
//! client sees a plain error status.

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::config::UpgradeConfig;
use crate::http::server::AppState;
use crate::lifecycle::LifecycleState;
use crate::stream::Session;

/// `GET /ws` — upgrade to a persistent streaming session.
pub async fn ws_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    if *state.lifecycle.borrow() != LifecycleState::Running {
        return (StatusCode::SERVICE_UNAVAILABLE, "Server is shutting down").into_response();
    }

    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return rejection.into_response(),
    };

    let origin = headers.get(header::ORIGIN);
    if !origin_allowed(&state.upgrade, origin) {
        tracing::warn!(
            origin = origin.and_then(|v| v.to_str().ok()).unwrap_or("<none>"),
            "websocket upgrade rejected: origin not allowed"
        );
        return (StatusCode::FORBIDDEN, "Origin not allowed").into_response();
    }

    let events = state.events.clone();
    let shutdown = state.shutdown.subscribe();

    // The session exists only once the handshake has succeeded.
    ws.on_failed_upgrade(|error| {
        tracing::error!(error = %error, "websocket upgrade failed");
    })
    .on_upgrade(move |socket| Session::new(events).run(socket, shutdown))
}

/// Exact-match origin check. Requests without an `Origin` header (non-browser
/// clients) pass only under the allow-all policy.
fn origin_allowed(config: &UpgradeConfig, origin: Option<&HeaderValue>) -> bool {
    if config.allow_all_origins {
        return true;
    }
    match origin.and_then(|v| v.to_str().ok()) {
        Some(origin) => config.allowed_origins.iter().any(|allowed| allowed == origin),
        None => false,
    }
}

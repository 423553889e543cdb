//! Structured event emission.
//!
//! The gateway's observable events — one record per HTTP request, one event
//! per data frame, one terminal event per session — flow through the
//! `EventSink` capability. Production uses [`TracingSink`]; tests inject a
//! recording implementation.

use std::time::Duration;

use crate::stream::frame::{Frame, FrameKind};
use crate::stream::session::{CloseReason, SessionId};

/// One completed HTTP request. Emitted exactly once per request,
/// fire-and-forget, regardless of handler outcome.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub duration: Duration,
    pub remote_addr: String,
}

/// Capability for emitting the gateway's structured events.
pub trait EventSink: Send + Sync {
    /// One completed HTTP request.
    fn request(&self, record: &RequestRecord);

    /// A session finished its upgrade handshake.
    fn connected(&self, session: SessionId);

    /// One received data frame (never called for control frames).
    fn frame(&self, session: SessionId, frame: &Frame);

    /// A session terminated. Called exactly once per session.
    fn disconnected(&self, session: SessionId, reason: &CloseReason);
}

/// Production sink: structured records via `tracing`, to stdout.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn request(&self, record: &RequestRecord) {
        tracing::info!(
            request_id = %record.request_id,
            method = %record.method,
            path = %record.path,
            duration_ms = record.duration.as_millis() as u64,
            remote_addr = %record.remote_addr,
            "request processed"
        );
    }

    fn connected(&self, session: SessionId) {
        tracing::info!(session_id = %session, "websocket connection established");
    }

    fn frame(&self, session: SessionId, frame: &Frame) {
        match frame.kind {
            FrameKind::Binary => {
                tracing::info!(
                    session_id = %session,
                    kind = %frame.kind,
                    size_bytes = frame.len,
                    "received binary frame"
                );
            }
            FrameKind::Text => {
                tracing::info!(
                    session_id = %session,
                    kind = %frame.kind,
                    content = frame.text.as_deref().unwrap_or(""),
                    "received text message"
                );
            }
            // Control frames never reach the sink.
            FrameKind::Control => {}
        }
    }

    fn disconnected(&self, session: SessionId, reason: &CloseReason) {
        if reason.is_expected() {
            tracing::info!(session_id = %session, reason = %reason, "client disconnected");
        } else {
            tracing::error!(session_id = %session, reason = %reason, "websocket closed unexpectedly");
        }
    }
}

//! Connection session state machine and receive loop.
//!
//! # Responsibilities
//! - Generate unique session IDs for tracing
//! - Own the upgraded socket exclusively until termination
//! - Run the blocking receive loop: classify frames, emit events
//! - Distinguish expected from unexpected closure
//! - Release the socket exactly once (idempotent close)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::ws::{Message, WebSocket};
use tokio::sync::broadcast;

use crate::observability::EventSink;
use crate::stream::frame::classify;

/// Global atomic counter for session IDs.
/// Relaxed ordering is sufficient since we only need uniqueness.
static SESSION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a streaming session, assigned at upgrade time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Generate a new unique session ID.
    pub fn new() -> Self {
        Self(SESSION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Receive loop is running.
    Active,
    /// Close initiated (drain), loop about to exit.
    Closing,
    /// Socket released; terminal.
    Closed,
}

/// Why a session's receive loop exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// Peer sent a close frame.
    PeerClosed,
    /// The underlying stream ended without a close handshake from our side.
    StreamEnded,
    /// Read or protocol error; abnormal termination.
    Error(String),
    /// Server is draining; the session closed itself.
    ShuttingDown,
}

impl CloseReason {
    /// Expected closures are logged at info level, unexpected ones at error.
    pub fn is_expected(&self) -> bool {
        !matches!(self, CloseReason::Error(_))
    }
}

impl std::fmt::Display for CloseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloseReason::PeerClosed => f.write_str("peer closed"),
            CloseReason::StreamEnded => f.write_str("stream ended"),
            CloseReason::Error(e) => write!(f, "error: {}", e),
            CloseReason::ShuttingDown => f.write_str("server shutting down"),
        }
    }
}

/// The live, stateful owner of one upgraded socket.
///
/// Created by the upgrade gateway immediately after a successful handshake;
/// mutated only by its own receive loop; destroyed when the loop exits.
pub struct Session {
    id: SessionId,
    state: SessionState,
    last_activity: Instant,
    events: Arc<dyn EventSink>,
}

impl Session {
    /// Create a new session in the `Active` state.
    pub fn new(events: Arc<dyn EventSink>) -> Self {
        Self {
            id: SessionId::new(),
            state: SessionState::Active,
            last_activity: Instant::now(),
            events,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Instant of the most recently received frame.
    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    /// Run the receive loop until the peer closes, an error occurs, or the
    /// server begins draining. Consumes the session; the socket is released
    /// when this returns.
    pub async fn run(mut self, mut socket: WebSocket, mut shutdown: broadcast::Receiver<()>) {
        self.events.connected(self.id);

        let reason = loop {
            tokio::select! {
                received = socket.recv() => match received {
                    Some(Ok(Message::Close(_))) => break CloseReason::PeerClosed,
                    Some(Ok(message)) => self.observe(&message),
                    Some(Err(e)) => break CloseReason::Error(e.to_string()),
                    None => break CloseReason::StreamEnded,
                },
                _ = shutdown.recv() => {
                    self.state = SessionState::Closing;
                    // Best effort: the peer may already be gone.
                    let _ = socket.send(Message::Close(None)).await;
                    break CloseReason::ShuttingDown;
                }
            }
        };

        self.close(&reason);
        // Dropping the socket here releases the channel handle.
    }

    /// Classify one frame and emit its data event, if any.
    fn observe(&mut self, message: &Message) {
        self.last_activity = Instant::now();
        let frame = classify(message);
        if frame.is_data() {
            self.events.frame(self.id, &frame);
        }
    }

    /// Transition to `Closed` and emit the terminal disconnect event.
    /// Closing an already-closed session is a no-op.
    pub fn close(&mut self, reason: &CloseReason) {
        if self.state == SessionState::Closed {
            return;
        }
        self.state = SessionState::Closed;
        self.events.disconnected(self.id, reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::sink::test_support::RecordingSink;
    use crate::stream::frame::FrameKind;

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn new_session_is_active() {
        let sink = Arc::new(RecordingSink::default());
        let session = Session::new(sink);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn data_frames_emit_exactly_one_event() {
        let sink = Arc::new(RecordingSink::default());
        let mut session = Session::new(sink.clone());

        session.observe(&Message::Binary(vec![0u8; 2048].into()));
        session.observe(&Message::Text("ping".into()));

        let frames = sink.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].kind, FrameKind::Binary);
        assert_eq!(frames[0].len, 2048);
        assert_eq!(frames[0].text, None);
        assert_eq!(frames[1].text.as_deref(), Some("ping"));
    }

    #[test]
    fn control_frames_emit_nothing() {
        let sink = Arc::new(RecordingSink::default());
        let mut session = Session::new(sink.clone());

        session.observe(&Message::Ping(Vec::new().into()));
        session.observe(&Message::Pong(Vec::new().into()));

        assert!(sink.frames().is_empty());
    }

    #[test]
    fn close_is_idempotent() {
        let sink = Arc::new(RecordingSink::default());
        let mut session = Session::new(sink.clone());

        session.close(&CloseReason::PeerClosed);
        session.close(&CloseReason::PeerClosed);

        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(sink.disconnects().len(), 1);
    }

    #[test]
    fn error_closures_are_unexpected() {
        assert!(CloseReason::PeerClosed.is_expected());
        assert!(CloseReason::StreamEnded.is_expected());
        assert!(CloseReason::ShuttingDown.is_expected());
        assert!(!CloseReason::Error("reset".into()).is_expected());
    }
}

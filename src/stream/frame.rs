//! Frame classification.
//!
//! Pure mapping from transport-level WebSocket messages to semantic frames.
//! Classification is total: it never fails, and it retains no payload bytes
//! beyond the textual content of `Text` frames.

use axum::extract::ws::Message;

/// Semantic kind of a received frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Opaque payload; only the length is observed.
    Binary,
    /// UTF-8 text message; content is observed.
    Text,
    /// Ping/pong/close. Classified but never emitted as a data event.
    Control,
}

impl std::fmt::Display for FrameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FrameKind::Binary => "binary",
            FrameKind::Text => "text",
            FrameKind::Control => "control",
        };
        f.write_str(name)
    }
}

/// One classified frame. Ephemeral: constructed per receive, dropped after
/// the observability event is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: FrameKind,
    pub len: usize,
    /// Decoded content for `Text` frames; `None` otherwise.
    pub text: Option<String>,
}

impl Frame {
    /// Whether this frame should produce a data event.
    pub fn is_data(&self) -> bool {
        self.kind != FrameKind::Control
    }
}

/// Classify a raw message.
///
/// Text decoding cannot fail: the transport already enforces UTF-8 on text
/// frames, and no other variant attempts to decode bytes.
pub fn classify(message: &Message) -> Frame {
    match message {
        Message::Binary(payload) => Frame {
            kind: FrameKind::Binary,
            len: payload.len(),
            text: None,
        },
        Message::Text(content) => Frame {
            kind: FrameKind::Text,
            len: content.len(),
            text: Some(content.to_string()),
        },
        Message::Ping(payload) | Message::Pong(payload) => Frame {
            kind: FrameKind::Control,
            len: payload.len(),
            text: None,
        },
        Message::Close(_) => Frame {
            kind: FrameKind::Control,
            len: 0,
            text: None,
        },
    }
}

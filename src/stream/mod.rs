//! WebSocket streaming subsystem.
//!
//! # Data Flow
//! ```text
//! upgraded socket
//!     → session.rs (receive loop, one task per session)
//!     → frame.rs (classify: binary / text / control)
//!     → EventSink (one structured event per data frame)
//! ```
//!
//! # Design Decisions
//! - Each session exclusively owns its socket; sessions share no state
//! - Frames are ephemeral: classified, logged, dropped
//! - The loop observes the shutdown broadcast between frame reads

pub mod frame;
pub mod session;

pub use frame::{classify, Frame, FrameKind};
pub use session::{CloseReason, Session, SessionId, SessionState};

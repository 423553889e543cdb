//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Bind listener → Starting → Running
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Draining (stop accepting) → drain in-flight → Stopped
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - State transitions are forward-only: Starting → Running → Draining → Stopped
//! - Shutdown has a bounded grace period: forced exit after the deadline
//! - Sessions subscribe to the shutdown broadcast and close themselves

pub mod shutdown;
pub mod signals;
pub mod state;

pub use shutdown::Shutdown;
pub use state::{Lifecycle, LifecycleState};

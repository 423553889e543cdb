//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! middleware + sessions produce:
//!     → sink.rs (EventSink: request records, frame events, disconnects)
//!     → logging.rs (tracing subscriber: JSON or pretty, stdout)
//! ```
//!
//! # Design Decisions
//! - Components receive an `EventSink` at construction instead of logging
//!   through ambient global state; tests inject a recording sink
//! - Structured JSON output for machine parsing in production
//! - Framework-level noise (TraceLayer, debug spans) still uses plain tracing

pub mod logging;
pub mod sink;

pub use sink::{EventSink, RequestRecord, TracingSink};

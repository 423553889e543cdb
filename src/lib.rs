//! Stream Gateway Library
//!
//! An HTTP gateway that serves a handful of JSON endpoints and upgrades
//! clients to persistent WebSocket sessions for frame streaming.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;
pub mod stream;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, lifecycle-aware serve loop)
//!     → middleware.rs (request record on every exit path)
//!     → route dispatch:
//!         GET /health, GET /api/v1/users/{id}, POST /api/v1/users → handlers.rs
//!         GET /ws → websocket.rs (origin check, upgrade, spawn session)
//!         anything else → 404
//! ```

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod websocket;

pub use server::{AppState, HttpServer};

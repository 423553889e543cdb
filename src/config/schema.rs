//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// WebSocket upgrade policy.
    pub upgrade: UpgradeConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,

    /// Request timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Peer coordination service (consumed outside this core).
    pub peer: PeerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// WebSocket upgrade policy.
///
/// The origin check runs before the handshake; a disallowed origin never
/// produces a session. The allow-all default is a deliberate dev posture —
/// production deployments set `allow_all_origins = false` plus an allow-list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpgradeConfig {
    /// Accept upgrades from any origin.
    pub allow_all_origins: bool,

    /// Exact-match origin allow-list, consulted when `allow_all_origins` is off.
    pub allowed_origins: Vec<String>,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            allow_all_origins: true,
            allowed_origins: Vec::new(),
        }
    }
}

/// Graceful shutdown settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Grace period for in-flight work after a termination signal, in seconds.
    pub grace_period_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: 10,
        }
    }
}

/// Request timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-request timeout for plain HTTP handlers, in seconds.
    /// Does not apply to upgraded WebSocket sessions.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Address of the peer coordination service.
///
/// Carried as configuration only; nothing in this crate dials it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PeerConfig {
    /// Service address (host:port).
    pub service_addr: String,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            service_addr: "localhost:50051".to_string(),
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Emit JSON log records to stdout. Pretty output when off.
    pub log_json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_json: true }
    }
}

impl GatewayConfig {
    /// Apply environment overrides.
    ///
    /// `PORT` replaces the port of the bind address; `PEER_SERVICE_ADDR`
    /// replaces the peer service address. Unset or unparseable values are
    /// ignored in favor of the existing configuration.
    pub fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.listener.bind_address = match self.listener.bind_address.rsplit_once(':') {
                    Some((host, _)) => format!("{}:{}", host, port),
                    None => format!("0.0.0.0:{}", port),
                };
            }
        }
        if let Ok(addr) = std::env::var("PEER_SERVICE_ADDR") {
            if !addr.is_empty() {
                self.peer.service_addr = addr;
            }
        }
    }

    /// Override only the port of the bind address.
    pub fn set_port(&mut self, port: u16) {
        self.listener.bind_address = match self.listener.bind_address.rsplit_once(':') {
            Some((host, _)) => format!("{}:{}", host, port),
            None => format!("0.0.0.0:{}", port),
        };
    }
}

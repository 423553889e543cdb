//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use stream_gateway::config::GatewayConfig;
use stream_gateway::http::HttpServer;
use stream_gateway::lifecycle::{LifecycleState, Shutdown};
use stream_gateway::observability::{EventSink, RequestRecord};
use stream_gateway::store::StaticStore;
use stream_gateway::stream::{CloseReason, Frame, SessionId};
use stream_gateway::GatewayError;

/// Event sink that records everything for assertions.
#[derive(Default)]
pub struct RecordingSink {
    requests: Mutex<Vec<RequestRecord>>,
    connects: Mutex<Vec<SessionId>>,
    frames: Mutex<Vec<(SessionId, Frame)>>,
    disconnects: Mutex<Vec<(SessionId, CloseReason)>>,
}

impl RecordingSink {
    pub fn requests(&self) -> Vec<RequestRecord> {
        self.requests.lock().unwrap().clone()
    }

    pub fn connects(&self) -> Vec<SessionId> {
        self.connects.lock().unwrap().clone()
    }

    pub fn frames(&self) -> Vec<(SessionId, Frame)> {
        self.frames.lock().unwrap().clone()
    }

    pub fn disconnects(&self) -> Vec<(SessionId, CloseReason)> {
        self.disconnects.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn request(&self, record: &RequestRecord) {
        self.requests.lock().unwrap().push(record.clone());
    }

    fn connected(&self, session: SessionId) {
        self.connects.lock().unwrap().push(session);
    }

    fn frame(&self, session: SessionId, frame: &Frame) {
        self.frames.lock().unwrap().push((session, frame.clone()));
    }

    fn disconnected(&self, session: SessionId, reason: &CloseReason) {
        self.disconnects
            .lock()
            .unwrap()
            .push((session, reason.clone()));
    }
}

/// A gateway running on an ephemeral port.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub sink: Arc<RecordingSink>,
    pub shutdown: Arc<Shutdown>,
    pub lifecycle: watch::Receiver<LifecycleState>,
    pub handle: JoinHandle<Result<(), GatewayError>>,
}

impl TestGateway {
    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

/// Spawn a gateway with the given configuration and wait until it is running.
pub async fn spawn_gateway(config: GatewayConfig) -> TestGateway {
    let sink = Arc::new(RecordingSink::default());
    let server = HttpServer::new(config, Arc::new(StaticStore), sink.clone());
    let shutdown = server.shutdown_handle();
    let mut lifecycle = server.lifecycle_watch();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(server.run(listener));

    lifecycle
        .wait_for(|state| *state == LifecycleState::Running)
        .await
        .unwrap();

    TestGateway {
        addr,
        sink,
        shutdown,
        lifecycle,
        handle,
    }
}

/// HTTP client that ignores any ambient proxy configuration.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Poll until `condition` holds or the timeout elapses.
pub async fn wait_until<F: Fn() -> bool>(condition: F) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        if condition() {
            return;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("condition not met within 5s");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

//! Request observability middleware.
//!
//! Emits exactly one [`RequestRecord`] per request. The record is held by a
//! scope guard created before the inner handler runs, so emission happens on
//! every exit path — success, error response, or panic unwind.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::http::server::AppState;
use crate::observability::{EventSink, RequestRecord};

/// Middleware entry point; layered over the whole router.
pub async fn request_log(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let _guard = RequestLogGuard::new(&request, addr, state.events.clone());
    next.run(request).await
}

/// Scope guard that emits the request record when dropped.
pub struct RequestLogGuard {
    request_id: String,
    method: String,
    path: String,
    remote_addr: String,
    start: Instant,
    events: Arc<dyn EventSink>,
}

impl RequestLogGuard {
    fn new(request: &Request, addr: SocketAddr, events: Arc<dyn EventSink>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            remote_addr: addr.to_string(),
            start: Instant::now(),
            events,
        }
    }

    #[cfg(test)]
    fn for_test(events: Arc<dyn EventSink>) -> Self {
        Self {
            request_id: "test".to_string(),
            method: "GET".to_string(),
            path: "/".to_string(),
            remote_addr: "127.0.0.1:0".to_string(),
            start: Instant::now(),
            events,
        }
    }
}

impl Drop for RequestLogGuard {
    fn drop(&mut self) {
        self.events.request(&RequestRecord {
            request_id: self.request_id.clone(),
            method: self.method.clone(),
            path: self.path.clone(),
            duration: self.start.elapsed(),
            remote_addr: self.remote_addr.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::sink::test_support::RecordingSink;

    #[test]
    fn guard_emits_exactly_one_record() {
        let sink = Arc::new(RecordingSink::default());
        {
            let _guard = RequestLogGuard::for_test(sink.clone());
        }
        assert_eq!(sink.requests().len(), 1);
    }

    #[test]
    fn guard_emits_on_panic_unwind() {
        let sink = Arc::new(RecordingSink::default());
        let sink_for_panic = sink.clone();

        let result = std::panic::catch_unwind(move || {
            let _guard = RequestLogGuard::for_test(sink_for_panic);
            panic!("handler blew up");
        });

        assert!(result.is_err());
        assert_eq!(sink.requests().len(), 1);
    }
}

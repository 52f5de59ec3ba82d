//! Test helpers for the AMSKY01 HTTP integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use skybridge::{ParamDef, ParamSink};

/// Mutable response served by the test API server.
pub type SharedResponse = Arc<Mutex<(StatusCode, String)>>;

pub fn shared_response(status: StatusCode, body: &str) -> SharedResponse {
    Arc::new(Mutex::new((status, body.to_string())))
}

async fn serve_doc(State(state): State<SharedResponse>) -> (StatusCode, String) {
    state.lock().unwrap().clone()
}

/// Spawn an HTTP server on an ephemeral port serving `/data.json` from the
/// shared response. Returns the endpoint URL.
pub async fn spawn_api_server(state: SharedResponse) -> String {
    let app = Router::new()
        .route("/data.json", get(serve_doc))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/data.json", addr)
}

/// Bind and immediately drop a listener, yielding a local address that
/// refuses connections.
pub async fn closed_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/data.json", addr)
}

/// Recorded parameter updates, shared with the test body.
pub type Updates = Arc<Mutex<Vec<(String, f64)>>>;

/// Sink that records every update and status push behind shared handles.
#[derive(Default)]
pub struct RecordingSink {
    pub updates: Updates,
    pub statuses: Arc<Mutex<Vec<String>>>,
}

impl ParamSink for RecordingSink {
    fn declare_number(&mut self, _def: &ParamDef) {}

    fn update_number(&mut self, name: &str, value: f64) {
        self.updates.lock().unwrap().push((name.to_string(), value));
    }

    fn update_status(&mut self, _device: &str, status: &str) {
        self.statuses.lock().unwrap().push(status.to_string());
    }
}

//! Shared helpers for Schematics client integration tests
//!
//! An in-process axum server stands in for the API. It records every request
//! and answers from per-path routes, then a FIFO queue, then `{}`.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Router;
use schematics::{NoAuthAuthenticator, SchematicsV1, SchematicsV1Options};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Decoded query parameters in the order they were sent.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let query = self.query.as_deref().unwrap_or("");
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Operation id carried in the SDK analytics header.
    pub fn operation_id(&self) -> Option<String> {
        self.header("X-IBMCloud-SDK-Analytics")?
            .split(';')
            .find_map(|kv| kv.strip_prefix("operation_id="))
            .map(str::to_string)
    }
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: vec![("content-type".into(), "application/json".into())],
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: vec![("content-type".into(), "text/plain".into())],
            body: body.to_string(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

#[derive(Default)]
struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    queue: Mutex<VecDeque<MockResponse>>,
    routes: Mutex<HashMap<String, MockResponse>>,
}

pub struct MockServer {
    pub url: String,
    state: Arc<MockState>,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(record).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("mock server has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server failed");
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    pub fn enqueue(&self, response: MockResponse) {
        self.state.queue.lock().unwrap().push_back(response);
    }

    pub fn route(&self, path: &str, response: MockResponse) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(path.to_string(), response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests()
            .pop()
            .expect("mock server received no requests")
    }

    /// A client pointed at this server that sends no credentials.
    pub fn client(&self) -> SchematicsV1 {
        SchematicsV1::new(SchematicsV1Options {
            url: Some(self.url.clone()),
            authenticator: Some(Arc::new(NoAuthAuthenticator)),
            ..Default::default()
        })
        .expect("failed to build client")
    }
}

async fn record(State(state): State<Arc<MockState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .map(|b| b.to_vec())
        .unwrap_or_default();

    let path = parts.uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method: parts.method.to_string(),
        path: path.clone(),
        query: parts.uri.query().map(str::to_string),
        headers: parts.headers,
        body,
    });

    let scripted = state.routes.lock().unwrap().get(&path).cloned();
    let scripted = scripted.or_else(|| state.queue.lock().unwrap().pop_front());
    let scripted = scripted.unwrap_or_else(|| MockResponse::json(200, serde_json::json!({})));

    let mut builder = Response::builder()
        .status(StatusCode::from_u16(scripted.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR));
    for (name, value) in &scripted.headers {
        builder = builder.header(name, value);
    }
    builder
        .body(Body::from(scripted.body))
        .expect("invalid mock response")
}

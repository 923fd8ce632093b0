//! Scriptable mock warehouse backend served by axum on an ephemeral port.
//!
//! Every request is recorded. Responses are looked up by `(method, path)`;
//! unscripted routes answer 404 with a JSON `message`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use stowage_client::api::WarehouseApi;

/// One request as the mock saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

#[derive(Default)]
pub struct MockBackend {
    routes: Mutex<HashMap<(String, String), (u16, Value)>>,
    log: Mutex<Vec<Recorded>>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Script the response for `method path`.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Serve on `127.0.0.1:0` and return the base URL.
    pub async fn serve(self: &Arc<Self>) -> String {
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(self));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

async fn handle(
    State(mock): State<Arc<MockBackend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let path = uri.path().to_string();
    mock.log.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        content_type: header("content-type"),
        authorization: header("authorization"),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let scripted = mock
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), path))
        .cloned();

    match scripted {
        Some((status, body)) => {
            let status = StatusCode::from_u16(status).unwrap();
            if status == StatusCode::NO_CONTENT {
                status.into_response()
            } else {
                (status, axum::Json(body)).into_response()
            }
        }
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({"message": "Route not scripted"})),
        )
            .into_response(),
    }
}

/// Start a mock backend and a client pointed at it.
pub async fn start() -> (Arc<MockBackend>, WarehouseApi) {
    let mock = MockBackend::new();
    let url = mock.serve().await;
    (mock, WarehouseApi::new(url))
}

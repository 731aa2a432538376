//! A scripted HTTP server for client tests.
//!
//! Binds to port 0, answers registered (method, path) pairs with canned responses,
//! and records every request it sees.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub params: Vec<(String, String)>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

#[derive(Clone)]
struct Canned {
    status: u16,
    content_type: &'static str,
    body: String,
}

#[derive(Default)]
struct Shared {
    routes: Mutex<HashMap<(String, String), Canned>>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct MockServer {
    pub base_url: String,
    shared: Arc<Shared>,
}

impl MockServer {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&shared));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            shared,
        }
    }

    pub fn respond_json(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        self.insert(method, path, status, "application/json", body.to_string());
    }

    pub fn respond_text(&self, method: &str, path: &str, status: u16, body: &str) {
        self.insert(method, path, status, "text/plain", body.to_string());
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("no request was made")
    }

    fn insert(&self, method: &str, path: &str, status: u16, content_type: &'static str, body: String) {
        self.shared.routes.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            Canned {
                status,
                content_type,
                body,
            },
        );
    }
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    shared.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        params,
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let canned = shared
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), uri.path().to_string()))
        .cloned();

    match canned {
        Some(canned) => Response::builder()
            .status(StatusCode::from_u16(canned.status).unwrap())
            .header(header::CONTENT_TYPE, canned.content_type)
            .body(Body::from(canned.body))
            .unwrap(),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"message":"Route not found"}"#,
        )
            .into_response(),
    }
}

pub fn script_json(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "characters": ["MAYA", "THEO"],
        "lines": [
            {"character": "MAYA", "dialogue": "You're late."},
            {"character": "THEO", "dialogue": "I'm early for tomorrow."}
        ],
        "createdAt": "2024-05-01T09:00:00.000Z",
        "updatedAt": "2024-05-01T09:00:00.000Z"
    })
}

//! Loopback recording server shared by the networking tests.
//!
//! An `axum` router on `127.0.0.1:0` serves `/files`, `/file/:name` and
//! `POST /file` with canned answers and keeps every request it saw. It runs on
//! its own tokio runtime so the blocking client under test can call it from
//! plain `#[test]` functions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};

/// One request as the fixture received it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

struct Fixture {
    listing: (StatusCode, String),
    files: HashMap<String, Vec<u8>>,
    upload_reply: (StatusCode, String),
    requests: Mutex<Vec<RecordedRequest>>,
}

impl Fixture {
    fn record(&self, method: &'static str, path: String, headers: HeaderMap, body: &[u8]) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path,
            headers,
            body: body.to_vec(),
        });
    }
}

/// Canned answers for a [`TestServer`]
pub struct TestServerBuilder {
    listing: (StatusCode, String),
    files: HashMap<String, Vec<u8>>,
    upload_reply: (StatusCode, String),
}

impl TestServerBuilder {
    pub fn listing(mut self, status: StatusCode, body: &str) -> Self {
        self.listing = (status, body.to_owned());
        self
    }

    pub fn file(mut self, name: &str, data: &[u8]) -> Self {
        self.files.insert(name.to_owned(), data.to_vec());
        self
    }

    pub fn upload_reply(mut self, status: StatusCode, body: &str) -> Self {
        self.upload_reply = (status, body.to_owned());
        self
    }

    pub fn start(self) -> TestServer {
        let fixture = Arc::new(Fixture {
            listing: self.listing,
            files: self.files,
            upload_reply: self.upload_reply,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/files", get(listing_handler))
            .route("/file", post(upload_handler))
            .route("/file/:name", get(file_handler))
            .with_state(Arc::clone(&fixture));

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();

        // Bound before returning, so clients never race the listener.
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        runtime.spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer {
            base_url,
            fixture,
            _runtime: runtime,
        }
    }
}

/// Running loopback server; stops when dropped
pub struct TestServer {
    base_url: String,
    fixture: Arc<Fixture>,
    _runtime: tokio::runtime::Runtime,
}

impl TestServer {
    /// Empty listing, no files, uploads answered with `201` and an empty name
    pub fn builder() -> TestServerBuilder {
        TestServerBuilder {
            listing: (StatusCode::OK, r#"{"devices": {}}"#.to_owned()),
            files: HashMap::new(),
            upload_reply: (StatusCode::CREATED, String::new()),
        }
    }

    /// Serve `body` from `/files` with `200 OK`
    pub fn with_listing(body: &str) -> Self {
        Self::builder().listing(StatusCode::OK, body).start()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.fixture.requests.lock().unwrap().clone()
    }
}

async fn listing_handler(State(fx): State<Arc<Fixture>>, headers: HeaderMap) -> Response {
    fx.record("GET", "/files".to_owned(), headers, &[]);
    let (status, body) = fx.listing.clone();
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn file_handler(
    State(fx): State<Arc<Fixture>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    fx.record("GET", format!("/file/{name}"), headers, &[]);
    match fx.files.get(&name) {
        Some(data) => (StatusCode::OK, [(header::CONTENT_TYPE, "audio/wav")], data.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn upload_handler(State(fx): State<Arc<Fixture>>, headers: HeaderMap, body: Bytes) -> Response {
    fx.record("POST", "/file".to_owned(), headers, &body);
    let (status, reply) = fx.upload_reply.clone();
    (status, [(header::CONTENT_TYPE, "text/html")], reply).into_response()
}

/// A port on 127.0.0.1 with nothing listening on it
pub fn closed_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

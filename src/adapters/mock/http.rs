//! Mock HTTP client for testing.
//!
//! Provides a scriptable mock transport: per-URL queued responses, sticky
//! responses, request-dependent handlers, and gates that hold a response
//! until the test releases it.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::traits::{ApiRequest, HttpClient, HttpError, Response, AUTHORIZATION};

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

impl MockResponse {
    /// A response with the given status and an empty body.
    pub fn status(status: u16) -> Self {
        MockResponse::Success(Response::new(status, bytes::Bytes::new()))
    }

    /// A response with the given status and a JSON body.
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &body))
    }
}

type Handler = Arc<dyn Fn(&ApiRequest) -> MockResponse + Send + Sync>;

#[derive(Default, Clone)]
struct Route {
    queued: VecDeque<MockResponse>,
    fallback: Option<Handler>,
    gate: Option<watch::Receiver<bool>>,
}

/// Holds back responses for a URL until released.
#[derive(Debug, Clone)]
pub struct MockGate {
    tx: Arc<watch::Sender<bool>>,
}

impl MockGate {
    /// Let every held and future request through.
    pub fn release(&self) {
        let _ = self.tx.send(true);
    }
}

/// Mock HTTP client for testing.
///
/// URLs are matched exactly first, then by longest registered prefix.
/// For a matched URL, queued responses are consumed first, then the sticky
/// response or handler answers.
///
/// # Example
///
/// ```ignore
/// use folio::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.push_response("https://api.example.com/api/skill", MockResponse::status(401));
/// client.set_response(
///     "https://api.example.com/api/skill",
///     MockResponse::json(200, serde_json::json!({ "status": true, "data": [] })),
/// );
/// ```
#[derive(Clone, Default)]
pub struct MockHttpClient {
    routes: Arc<Mutex<HashMap<String, Route>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request to `url` with `response` once the queue is empty.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.set_handler(url, move |_| response.clone());
    }

    /// Queue a one-off response for `url`.
    pub fn push_response(&self, url: &str, response: MockResponse) {
        let mut routes = self.routes.lock().unwrap();
        routes
            .entry(url.to_string())
            .or_default()
            .queued
            .push_back(response);
    }

    /// Answer requests to `url` by calling `handler`.
    pub fn set_handler<F>(&self, url: &str, handler: F)
    where
        F: Fn(&ApiRequest) -> MockResponse + Send + Sync + 'static,
    {
        let mut routes = self.routes.lock().unwrap();
        routes.entry(url.to_string()).or_default().fallback = Some(Arc::new(handler));
    }

    /// Hold every response for `url` until the returned gate is released.
    /// The request is recorded before it blocks.
    pub fn hold(&self, url: &str) -> MockGate {
        let (tx, rx) = watch::channel(false);
        let mut routes = self.routes.lock().unwrap();
        routes.entry(url.to_string()).or_default().gate = Some(rx);
        MockGate { tx: Arc::new(tx) }
    }

    /// Get all recorded requests, in the order they were issued.
    pub fn get_requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get recorded requests for one URL.
    pub fn requests_to(&self, url: &str) -> Vec<ApiRequest> {
        self.get_requests()
            .into_iter()
            .filter(|request| request.url == url)
            .collect()
    }

    /// Number of requests issued to one URL.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests_to(url).len()
    }

    /// The `Authorization` header of each recorded request to `url`.
    pub fn authorizations_to(&self, url: &str) -> Vec<Option<String>> {
        self.requests_to(url)
            .iter()
            .map(|request| request.header(AUTHORIZATION).map(str::to_string))
            .collect()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn route_key(routes: &HashMap<String, Route>, url: &str) -> Option<String> {
        if routes.contains_key(url) {
            return Some(url.to_string());
        }
        routes
            .keys()
            .filter(|pattern| url.starts_with(pattern.as_str()))
            .max_by_key(|pattern| pattern.len())
            .cloned()
    }

    fn gate_for(&self, url: &str) -> Option<watch::Receiver<bool>> {
        let routes = self.routes.lock().unwrap();
        let key = Self::route_key(&routes, url)?;
        routes.get(&key).and_then(|route| route.gate.clone())
    }

    fn respond(&self, request: &ApiRequest) -> Option<MockResponse> {
        let handler = {
            let mut routes = self.routes.lock().unwrap();
            let key = Self::route_key(&routes, &request.url)?;
            let route = routes.get_mut(&key)?;
            if let Some(response) = route.queued.pop_front() {
                return Some(response);
            }
            route.fallback.clone()?
        };
        Some(handler(request))
    }
}

impl std::fmt::Debug for MockHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttpClient")
            .field("requests", &self.requests.lock().unwrap().len())
            .finish()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: &ApiRequest) -> Result<Response, HttpError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(mut gate) = self.gate_for(&request.url) {
            loop {
                let open = *gate.borrow();
                if open {
                    break;
                }
                if gate.changed().await.is_err() {
                    break;
                }
            }
        }

        match self.respond(request) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "No mock response for URL: {}",
                request.url
            ))),
        }
    }
}

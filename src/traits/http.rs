//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for HTTP operations, enabling
//! dependency injection and mocking in tests. The transport knows nothing
//! about sessions: bearer tokens and refresh handling live in
//! [`crate::client::ApiClient`].

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Name of the header carrying the bearer credential.
pub const AUTHORIZATION: &str = "Authorization";

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// The method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing HTTP request.
///
/// Carries a one-shot `retried` flag: once a request has been replayed after
/// a token refresh it is never handed to the refresh coordinator again, so a
/// second 401 surfaces to the caller instead of looping.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: Option<String>,
    retried: bool,
}

impl ApiRequest {
    /// Create a request with no headers and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
            retried: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::Patch, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    /// Set a header, replacing any existing header with the same name
    /// (names compare case-insensitively).
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// In-place variant of [`ApiRequest::with_header`].
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
        self.headers.insert(name.to_string(), value.into());
    }

    /// Set a raw body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `body` as JSON and set the matching content type.
    pub fn with_json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, serde_json::Error> {
        let encoded = serde_json::to_string(body)?;
        Ok(self
            .with_header("Content-Type", "application/json")
            .with_body(encoded))
    }

    /// Look up a header value by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether this request is already a post-refresh replay.
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    pub(crate) fn mark_retried(&mut self) {
        self.retried = true;
    }
}

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a response whose body is the JSON encoding of `value`.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, Bytes::from(value.to_string()))
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the server rejected the supplied credential.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP transport errors.
///
/// Status codes are not errors at this layer; only failures to obtain a
/// response at all end up here.
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// IO error while reading the body
    Io(String),
    /// Invalid URL
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP transport.
///
/// Implementations include the production reqwest-based client and the
/// scripted mock used in tests.
///
/// # Example
///
/// ```ignore
/// use folio::traits::{ApiRequest, HttpClient, HttpError};
///
/// async fn fetch<C: HttpClient>(client: &C) -> Result<String, HttpError> {
///     let response = client.execute(&ApiRequest::get("https://api.example.com/data")).await?;
///     response.text().map_err(|e| HttpError::Other(e.to_string()))
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a request and return the response for any status code.
    async fn execute(&self, request: &ApiRequest) -> Result<Response, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_new() {
        let response = Response::new(200, Bytes::from("Hello"));
        assert_eq!(response.status, 200);
        assert!(response.headers.is_empty());
        assert_eq!(response.body, Bytes::from("Hello"));
    }

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200, Bytes::new()).is_success());
        assert!(Response::new(204, Bytes::new()).is_success());
        assert!(!Response::new(301, Bytes::new()).is_success());
        assert!(!Response::new(401, Bytes::new()).is_success());
        assert!(!Response::new(500, Bytes::new()).is_success());
    }

    #[test]
    fn test_response_is_unauthorized() {
        assert!(Response::new(401, Bytes::new()).is_unauthorized());
        assert!(!Response::new(403, Bytes::new()).is_unauthorized());
        assert!(!Response::new(200, Bytes::new()).is_unauthorized());
    }

    #[test]
    fn test_response_json() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Payload {
            status: bool,
        }

        let response = Response::json_body(200, &serde_json::json!({ "status": true }));
        let data: Payload = response.json().unwrap();
        assert_eq!(data, Payload { status: true });
    }

    #[test]
    fn test_request_header_replaces_case_insensitively() {
        let request = ApiRequest::get("http://localhost/x")
            .with_header("authorization", "Bearer old")
            .with_header(AUTHORIZATION, "Bearer new");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header("AUTHORIZATION"), Some("Bearer new"));
    }

    #[test]
    fn test_request_with_json_sets_content_type() {
        let request = ApiRequest::post("http://localhost/x")
            .with_json(&serde_json::json!({ "name": "Rust" }))
            .unwrap();

        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"Rust"}"#));
    }

    #[test]
    fn test_request_retry_flag_is_one_shot() {
        let mut request = ApiRequest::delete("http://localhost/api/skill/1");
        assert!(!request.is_retried());
        request.mark_retried();
        assert!(request.is_retried());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            HttpError::Timeout("30s".to_string()).to_string(),
            "Request timeout: 30s"
        );
        assert_eq!(
            HttpError::InvalidUrl("bad url".to_string()).to_string(),
            "Invalid URL: bad url"
        );
    }
}

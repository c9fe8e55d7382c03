//! Reqwest-based HTTP client adapter.
//!
//! This module provides the production transport, implementing the
//! [`HttpClient`] trait from `crate::traits`.

use async_trait::async_trait;
use std::time::Duration;

use crate::traits::{ApiRequest, Headers, HttpClient, HttpError, Method, Response};

/// HTTP client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use folio::adapters::ReqwestHttpClient;
/// use folio::traits::{ApiRequest, HttpClient};
///
/// let client = ReqwestHttpClient::new();
/// let response = client.execute(&ApiRequest::get("https://api.example.com/data")).await?;
/// println!("Status: {}", response.status);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Self::convert_error)?;
        Ok(Self { client })
    }

    /// Create a new ReqwestHttpClient with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    fn convert_method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    /// Convert reqwest error to HttpError.
    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(err.to_string())
        } else if err.is_body() || err.is_decode() {
            HttpError::Io(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    /// Convert reqwest headers to our Headers type.
    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Apply headers to a request builder.
    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &ApiRequest) -> Result<Response, HttpError> {
        let builder = self
            .client
            .request(Self::convert_method(request.method), &request.url);
        let mut builder = Self::apply_headers(builder, &request.headers);
        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        let response_headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(Self::convert_error)?;

        Ok(Response::with_headers(status, response_headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_http_client_default() {
        let client = ReqwestHttpClient::default();
        let _ = client.inner();
    }

    #[test]
    fn test_reqwest_http_client_with_timeout() {
        let client = ReqwestHttpClient::with_timeout(Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_convert_method() {
        assert_eq!(
            ReqwestHttpClient::convert_method(Method::Patch),
            reqwest::Method::PATCH
        );
        assert_eq!(
            ReqwestHttpClient::convert_method(Method::Delete),
            reqwest::Method::DELETE
        );
    }

    #[test]
    fn test_apply_headers() {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Authorization".to_string(), "Bearer token".to_string());

        let client = reqwest::Client::new();
        let builder = client.get("http://localhost");
        let request = ReqwestHttpClient::apply_headers(builder, &headers)
            .build()
            .unwrap();

        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer token"
        );
        assert_eq!(
            request.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_execute_against_closed_port_fails() {
        let client = ReqwestHttpClient::new();
        let result = client
            .execute(&ApiRequest::get("http://127.0.0.1:1/api/project"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_execute_invalid_url() {
        let client = ReqwestHttpClient::new();
        let result = client.execute(&ApiRequest::get("not a url")).await;
        assert!(result.is_err());
    }
}

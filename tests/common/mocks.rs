//! Mock configurations for test fixtures.
//!
//! Re-exports the mock adapters from `folio::adapters::mock` and provides
//! canned responses for the auth and resource endpoints.

pub use folio::adapters::mock::{
    InMemoryStore, MockGate, MockHttpClient, MockResponse, RecordingNotifier,
};
pub use folio::traits::{ApiRequest, HttpClient, Response, AUTHORIZATION};

use serde_json::json;

/// Successful refresh returning the given pair.
pub fn refresh_ok(access_token: &str, refresh_token: &str) -> MockResponse {
    MockResponse::json(
        200,
        json!({
            "status": true,
            "data": { "access_token": access_token, "refresh_token": refresh_token }
        }),
    )
}

/// Refresh answered with `status: false`.
pub fn refresh_declined() -> MockResponse {
    MockResponse::json(
        200,
        json!({ "status": false, "message": "Invalid refresh token" }),
    )
}

/// Envelope wrapping `data`.
pub fn envelope(data: serde_json::Value) -> MockResponse {
    MockResponse::json(200, json!({ "status": true, "data": data }))
}

/// Handler that answers 200 with an envelope naming the request URL when
/// the request carries `Bearer <token>`, and 401 otherwise.
pub fn accept_only(token: &str) -> impl Fn(&ApiRequest) -> MockResponse + Send + Sync + 'static {
    let expected = format!("Bearer {}", token);
    move |request: &ApiRequest| {
        if request.header(AUTHORIZATION) == Some(expected.as_str()) {
            envelope(json!({ "url": request.url }))
        } else {
            MockResponse::json(401, json!({ "status": false, "message": "Unauthorized" }))
        }
    }
}

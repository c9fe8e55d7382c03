//! Request decoration.

use crate::traits::{ApiRequest, AUTHORIZATION};

/// Attach `Authorization: Bearer <token>` when a token is present.
///
/// An existing `Authorization` header is replaced, so a replayed request
/// carries only the refreshed credential. Without a token the request is
/// returned unchanged.
pub fn authorize(request: ApiRequest, access_token: Option<&str>) -> ApiRequest {
    match access_token {
        Some(token) => request.with_header(AUTHORIZATION, format!("Bearer {}", token)),
        None => request,
    }
}

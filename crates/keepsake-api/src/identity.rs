//! Caller-identity extractor.
//!
//! Authentication itself is an external collaborator: the proxy in front of
//! this service authenticates the caller and writes their stable principal
//! into a trusted header. This extractor only reads that header — share-link
//! routes don't use it at all, because the token is the credential there.

use axum::{extract::FromRequestParts, http::request::Parts};
use keepsake_core::identity::Principal;

use crate::error::ApiError;

/// Header carrying the externally-authenticated principal.
pub const PRINCIPAL_HEADER: &str = "x-keepsake-principal";

/// The authenticated caller. Present in a handler's signature means the
/// request carried a non-empty principal header.
pub struct Identity(pub Principal);

impl<S: Send + Sync> FromRequestParts<S> for Identity {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    let principal = parts
      .headers
      .get(PRINCIPAL_HEADER)
      .and_then(|v| v.to_str().ok())
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .ok_or(ApiError::Unauthorized)?;

    Ok(Identity(Principal::new(principal)))
  }
}

#[cfg(test)]
mod tests {
  use axum::http::Request;

  use super::*;

  async fn extract(req: Request<axum::body::Body>) -> Result<Identity, ApiError> {
    let (mut parts, _) = req.into_parts();
    Identity::from_request_parts(&mut parts, &()).await
  }

  #[tokio::test]
  async fn header_present() {
    let req = Request::builder()
      .header(PRINCIPAL_HEADER, "alice")
      .body(axum::body::Body::empty())
      .unwrap();
    let Identity(principal) = extract(req).await.unwrap();
    assert_eq!(principal.as_str(), "alice");
  }

  #[tokio::test]
  async fn missing_header() {
    let req = Request::builder().body(axum::body::Body::empty()).unwrap();
    assert!(matches!(extract(req).await, Err(ApiError::Unauthorized)));
  }

  #[tokio::test]
  async fn blank_header() {
    let req = Request::builder()
      .header(PRINCIPAL_HEADER, "   ")
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(matches!(extract(req).await, Err(ApiError::Unauthorized)));
  }

  #[tokio::test]
  async fn surrounding_whitespace_is_trimmed() {
    let req = Request::builder()
      .header(PRINCIPAL_HEADER, " alice ")
      .body(axum::body::Body::empty())
      .unwrap();
    let Identity(principal) = extract(req).await.unwrap();
    assert_eq!(principal.as_str(), "alice");
  }
}

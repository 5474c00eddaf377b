//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use keepsake_core::Error as GalleryError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// No usable principal header on a route that requires identity.
  #[error("unauthorized")]
  Unauthorized,

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Gallery(#[from] GalleryError),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Unauthorized => {
        (StatusCode::UNAUTHORIZED, "unauthorized".to_owned())
      }
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Gallery(e) => {
        let status = match e {
          GalleryError::AlbumNotFound(_)
          | GalleryError::PhotoNotFound(_)
          // The bearer of a dead token learns nothing beyond "no such
          // album here".
          | GalleryError::InvalidOrExpiredLink => StatusCode::NOT_FOUND,
          GalleryError::PermissionDenied | GalleryError::NotInAlbum(_) => {
            StatusCode::FORBIDDEN
          }
          GalleryError::InvalidOrder | GalleryError::Validation(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
          }
          GalleryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

//! Handlers for `/photos` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/photos` | Upload orchestration; optional `album_id` |
//! | `GET`  | `/photos/:id` | Owner-only |
//! | `GET`  | `/photos?ids=a,b,c` | Batch; fail-fast on any missing id |
//! | `PUT`  | `/photos/:id/caption` | Owner-only; empty string clears |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use keepsake_core::{
  Gallery,
  photo::{BlobRef, Photo, PhotoUpload},
  store::GalleryStore,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{error::ApiError, identity::Identity};

/// Parse a comma-separated uuid list from an `ids` query parameter.
pub(crate) fn parse_ids(raw: &str) -> Result<Vec<Uuid>, ApiError> {
  raw
    .split(',')
    .filter(|s| !s.is_empty())
    .map(|s| {
      Uuid::parse_str(s.trim())
        .map_err(|_| ApiError::BadRequest(format!("invalid photo id: {s:?}")))
    })
    .collect()
}

// ─── Upload ──────────────────────────────────────────────────────────────────

/// Upload request body. The blob bytes were already stored by the external
/// blob layer; only the returned reference travels here.
#[derive(Debug, Deserialize)]
pub struct UploadBody {
  pub album_id:     Option<Uuid>,
  pub filename:     String,
  pub content_type: String,
  pub byte_size:    u64,
  pub caption:      Option<String>,
  pub blob:         BlobRef,
}

/// `POST /photos`
pub async fn upload<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
  Json(body): Json<UploadBody>,
) -> Result<impl IntoResponse, ApiError> {
  let id = gallery
    .upload_photo(&caller, PhotoUpload {
      album_id:     body.album_id,
      filename:     body.filename,
      content_type: body.content_type,
      byte_size:    body.byte_size,
      caption:      body.caption,
      blob:         body.blob,
    })
    .await?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

// ─── Reads ───────────────────────────────────────────────────────────────────

/// `GET /photos/:id`
pub async fn get_one<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
  Path(id): Path<Uuid>,
) -> Result<Json<Photo>, ApiError> {
  Ok(Json(gallery.photo(&caller, id).await?))
}

#[derive(Debug, Deserialize)]
pub struct IdsParams {
  pub ids: String,
}

/// `GET /photos?ids=a,b,c`
pub async fn get_many<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
  Query(params): Query<IdsParams>,
) -> Result<Json<Vec<Photo>>, ApiError> {
  let ids = parse_ids(&params.ids)?;
  Ok(Json(gallery.photos(&caller, &ids).await?))
}

// ─── Caption ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CaptionBody {
  pub caption: String,
}

/// `PUT /photos/:id/caption`
pub async fn caption<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
  Path(id): Path<Uuid>,
  Json(body): Json<CaptionBody>,
) -> Result<StatusCode, ApiError> {
  gallery.update_caption(&caller, id, body.caption).await?;
  Ok(StatusCode::NO_CONTENT)
}

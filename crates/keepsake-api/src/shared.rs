//! Handlers for share-link management and capability-based reads.
//!
//! The two `/shared/*` routes take no caller identity at all: the share
//! token in the path is the only credential, and an unknown or revoked
//! token reads as a plain 404.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/albums/:id/share-links` | Owner-only |
//! | `DELETE` | `/share-links/:share_id` | Owner-only; idempotent |
//! | `GET`    | `/shared/:share_id` | No identity |
//! | `GET`    | `/shared/:share_id/photos?ids=a,b` | No identity; members only |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use keepsake_core::{Gallery, album::Album, photo::Photo, store::GalleryStore};
use serde_json::json;
use uuid::Uuid;

use crate::{
  error::ApiError,
  identity::Identity,
  photos::{IdsParams, parse_ids},
};

// ─── Link management (identity-authenticated) ────────────────────────────────

/// `POST /albums/:id/share-links`
pub async fn create<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
  Path(album_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
  let share_id = gallery.create_share_link(&caller, album_id).await?;
  Ok((StatusCode::CREATED, Json(json!({ "share_id": share_id }))))
}

/// `DELETE /share-links/:share_id`
pub async fn revoke<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
  Path(share_id): Path<String>,
) -> Result<StatusCode, ApiError> {
  gallery.revoke_share_link(&caller, &share_id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Capability reads (token-authenticated) ──────────────────────────────────

/// `GET /shared/:share_id`
pub async fn album<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Path(share_id): Path<String>,
) -> Result<Json<Album>, ApiError> {
  Ok(Json(gallery.shared_album(&share_id).await?))
}

/// `GET /shared/:share_id/photos?ids=a,b,c`
pub async fn photos<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Path(share_id): Path<String>,
  Query(params): Query<IdsParams>,
) -> Result<Json<Vec<Photo>>, ApiError> {
  let ids = parse_ids(&params.ids)?;
  Ok(Json(gallery.shared_photos(&share_id, &ids).await?))
}

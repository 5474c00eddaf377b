//! Handlers for `/albums` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/albums` | Caller-scoped list |
//! | `POST` | `/albums` | Body: `{"name":"Ceremony"}` |
//! | `GET`  | `/albums/:id` | Owner-only; 404 if unknown |
//! | `PUT`  | `/albums/:id/name` | Owner-only rename |
//! | `PUT`  | `/albums/:id/order` | Owner-only; body must be an exact permutation |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use keepsake_core::{Gallery, album::Album, store::GalleryStore};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{error::ApiError, identity::Identity};

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /albums`
pub async fn list<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
) -> Result<Json<Vec<Album>>, ApiError> {
  Ok(Json(gallery.albums(&caller).await?))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name: String,
}

/// `POST /albums`
pub async fn create<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let id = gallery.create_album(&caller, body.name).await?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /albums/:id`
pub async fn get_one<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
  Path(id): Path<Uuid>,
) -> Result<Json<Album>, ApiError> {
  Ok(Json(gallery.album(&caller, id).await?))
}

// ─── Rename ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RenameBody {
  pub name: String,
}

/// `PUT /albums/:id/name`
pub async fn rename<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
  Path(id): Path<Uuid>,
  Json(body): Json<RenameBody>,
) -> Result<StatusCode, ApiError> {
  gallery.update_album_name(&caller, id, body.name).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Reorder ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReorderBody {
  pub new_order: Vec<Uuid>,
}

/// `PUT /albums/:id/order` — 422 unless `new_order` is a permutation of the
/// current membership.
pub async fn reorder<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
  Path(id): Path<Uuid>,
  Json(body): Json<ReorderBody>,
) -> Result<StatusCode, ApiError> {
  gallery.reorder_photos(&caller, id, body.new_order).await?;
  Ok(StatusCode::NO_CONTENT)
}

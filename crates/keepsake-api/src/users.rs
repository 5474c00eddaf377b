//! Handlers for role and profile endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/roles` | Admin-only. Body: `{"user":"...","role":"user"}` |
//! | `GET`  | `/me/role` | Effective role; guest if never assigned |
//! | `GET`  | `/me/is-admin` | Convenience predicate |
//! | `GET`  | `/me/profile` | `null` body until the caller saves one |
//! | `PUT`  | `/me/profile` | Create-or-replace, idempotent |
//! | `GET`  | `/profiles/:principal` | Any identity may read any profile |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use keepsake_core::{
  Gallery,
  identity::{Principal, UserProfile, UserRole},
  store::GalleryStore,
};
use serde::Deserialize;

use crate::{error::ApiError, identity::Identity};

// ─── Roles ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AssignRoleBody {
  pub user: Principal,
  pub role: UserRole,
}

/// `POST /roles` — admin-only.
pub async fn assign_role<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
  Json(body): Json<AssignRoleBody>,
) -> Result<StatusCode, ApiError> {
  gallery.assign_role(&caller, body.user, body.role).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /me/role`
pub async fn caller_role<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
) -> Result<Json<UserRole>, ApiError> {
  Ok(Json(gallery.role_of(&caller).await?))
}

/// `GET /me/is-admin`
pub async fn caller_is_admin<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
) -> Result<Json<bool>, ApiError> {
  Ok(Json(gallery.is_admin(&caller).await?))
}

// ─── Profiles ────────────────────────────────────────────────────────────────

/// `GET /me/profile` — `null` is the first-class "not set up yet" signal.
pub async fn caller_profile<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
) -> Result<Json<Option<UserProfile>>, ApiError> {
  Ok(Json(gallery.profile_of(&caller).await?))
}

/// `PUT /me/profile`
pub async fn save_profile<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(caller): Identity,
  Json(profile): Json<UserProfile>,
) -> Result<StatusCode, ApiError> {
  gallery.save_profile(&caller, profile).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /profiles/:principal`
pub async fn profile<S: GalleryStore>(
  State(gallery): State<Arc<Gallery<S>>>,
  Identity(_caller): Identity,
  Path(principal): Path<String>,
) -> Result<Json<Option<UserProfile>>, ApiError> {
  Ok(Json(gallery.profile_of(&Principal::new(principal)).await?))
}

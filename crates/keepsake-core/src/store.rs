//! The `GalleryStore` trait — the persistence seam.
//!
//! The trait is implemented by storage backends (e.g.
//! `keepsake-store-sqlite`). It is persistence only: no authorization, no
//! permutation checks, no cross-entity orchestration. All of that lives in
//! [`crate::Gallery`], which is the sole caller of the mutating methods and
//! serializes album mutations per album id.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  album::Album,
  identity::{Principal, UserProfile, UserRole},
  photo::Photo,
  share::ShareLink,
};

/// Abstraction over a Keepsake storage backend.
pub trait GalleryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Roles ─────────────────────────────────────────────────────────────

  /// Create or replace the role assignment for `user`.
  fn put_role(
    &self,
    user: Principal,
    role: UserRole,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The explicitly assigned role for `user`, or `None` if no assignment
  /// exists. Defaulting to guest is the service's concern.
  fn role_of(
    &self,
    user: Principal,
  ) -> impl Future<Output = Result<Option<UserRole>, Self::Error>> + Send + '_;

  // ── Profiles ──────────────────────────────────────────────────────────

  /// Create or replace the profile for `user`. Idempotent.
  fn put_profile(
    &self,
    user: Principal,
    profile: UserProfile,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The stored profile for `user`, or `None` if never saved.
  fn profile_of(
    &self,
    user: Principal,
  ) -> impl Future<Output = Result<Option<UserProfile>, Self::Error>> + Send + '_;

  // ── Photos ────────────────────────────────────────────────────────────

  /// Persist a fully-built photo record.
  fn insert_photo(
    &self,
    photo: Photo,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a photo by id. Returns `None` if not found.
  fn photo(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Photo>, Self::Error>> + Send + '_;

  /// Overwrite the caption of an existing photo. `None` clears it.
  fn set_caption(
    &self,
    id: Uuid,
    caption: Option<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Albums ────────────────────────────────────────────────────────────

  /// Persist a fully-built album record (membership included).
  fn insert_album(
    &self,
    album: Album,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve an album (with ordered membership) by id.
  fn album(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Album>, Self::Error>> + Send + '_;

  /// All albums owned by `owner`, ordered by creation time.
  fn albums_of(
    &self,
    owner: Principal,
  ) -> impl Future<Output = Result<Vec<Album>, Self::Error>> + Send + '_;

  /// Rename an existing album and bump its `updated_at`.
  fn set_album_name(
    &self,
    id: Uuid,
    name: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Atomically replace an album's entire membership order and bump its
  /// `updated_at`. The caller has already validated the permutation.
  fn set_album_order(
    &self,
    id: Uuid,
    photo_ids: Vec<Uuid>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Append one photo to the end of an album's membership and bump its
  /// `updated_at`. The sole place new membership is created.
  fn push_album_photo(
    &self,
    album_id: Uuid,
    photo_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Share links ───────────────────────────────────────────────────────

  /// Persist a freshly issued share link.
  fn insert_share_link(
    &self,
    link: ShareLink,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a share link (active or tombstoned) by its token.
  fn share_link(
    &self,
    share_id: String,
  ) -> impl Future<Output = Result<Option<ShareLink>, Self::Error>> + Send + '_;

  /// Permanently flip a link's `active` flag to false. The row is retained
  /// as a tombstone, never deleted.
  fn deactivate_share_link(
    &self,
    share_id: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

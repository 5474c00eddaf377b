//! [`Gallery`] — the authorization and orchestration layer.
//!
//! Every operation resolves the caller's role or ownership before touching
//! state; a failed call leaves all entities exactly as they were. Album
//! mutations (rename, append, reorder) are serialized per album id through
//! a lock arena, so concurrent read-modify-write sequences on the same
//! album cannot interleave. Cross-album operations never contend.

use std::{
  collections::{HashMap, HashSet},
  sync::Arc,
};

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
  Error, Result,
  album::{self, Album},
  identity::{Principal, UserProfile, UserRole},
  photo::{Photo, PhotoUpload},
  share::ShareLink,
  store::GalleryStore,
};

/// The album/photo management service, generic over its storage backend.
///
/// Construct once, wrap in an [`Arc`], and share across handlers.
pub struct Gallery<S> {
  store:            Arc<S>,
  /// Principals that resolve as admin when no explicit role row exists.
  /// A stored assignment takes precedence, so a bootstrap admin can be
  /// demoted by another admin.
  bootstrap_admins: HashSet<Principal>,
  /// Arena of per-album locks; entries are created on first use and live
  /// for the service's lifetime.
  locks:            Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

fn store_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> Error {
  Error::Store(Box::new(e))
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::Validation(format!("{field} must not be empty")));
  }
  Ok(())
}

impl<S: GalleryStore> Gallery<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      bootstrap_admins: HashSet::new(),
      locks: Mutex::new(HashMap::new()),
    }
  }

  /// Seed the set of principals that hold admin without a stored role row.
  /// This is the bootstrap path for the very first `assign_role` call.
  pub fn with_bootstrap_admins(
    mut self,
    admins: impl IntoIterator<Item = Principal>,
  ) -> Self {
    self.bootstrap_admins = admins.into_iter().collect();
    self
  }

  async fn album_lock(&self, id: Uuid) -> Arc<Mutex<()>> {
    let mut locks = self.locks.lock().await;
    locks.entry(id).or_default().clone()
  }

  // ── Roles ─────────────────────────────────────────────────────────────

  /// Assign `role` to `target`. Admin-only; overwrites any existing
  /// assignment, visible to subsequent lookups immediately.
  pub async fn assign_role(
    &self,
    caller: &Principal,
    target: Principal,
    role: UserRole,
  ) -> Result<()> {
    if !self.is_admin(caller).await? {
      return Err(Error::PermissionDenied);
    }
    self
      .store
      .put_role(target.clone(), role)
      .await
      .map_err(store_err)?;
    tracing::info!(user = %target, ?role, "role assigned");
    Ok(())
  }

  /// The effective role for `user`: the stored assignment if one exists,
  /// admin for bootstrap principals, guest otherwise. Never fails with a
  /// domain error.
  pub async fn role_of(&self, user: &Principal) -> Result<UserRole> {
    if let Some(role) =
      self.store.role_of(user.clone()).await.map_err(store_err)?
    {
      return Ok(role);
    }
    if self.bootstrap_admins.contains(user) {
      return Ok(UserRole::Admin);
    }
    Ok(UserRole::Guest)
  }

  pub async fn is_admin(&self, caller: &Principal) -> Result<bool> {
    Ok(self.role_of(caller).await?.is_admin())
  }

  // ── Profiles ──────────────────────────────────────────────────────────

  /// Create or replace the caller's own profile. Idempotent.
  pub async fn save_profile(
    &self,
    caller: &Principal,
    profile: UserProfile,
  ) -> Result<()> {
    require_non_empty("profile name", &profile.name)?;
    self
      .store
      .put_profile(caller.clone(), profile)
      .await
      .map_err(store_err)
  }

  /// The stored profile for `user`; `None` means never set up.
  pub async fn profile_of(
    &self,
    user: &Principal,
  ) -> Result<Option<UserProfile>> {
    self.store.profile_of(user.clone()).await.map_err(store_err)
  }

  // ── Albums ────────────────────────────────────────────────────────────

  /// Create an empty album owned by the caller and return its id.
  pub async fn create_album(
    &self,
    caller: &Principal,
    name: String,
  ) -> Result<Uuid> {
    require_non_empty("album name", &name)?;
    let album = Album::new(caller.clone(), name);
    let id = album.id;
    self.store.insert_album(album).await.map_err(store_err)?;
    tracing::info!(album = %id, owner = %caller, "album created");
    Ok(id)
  }

  /// Retrieve one of the caller's own albums.
  pub async fn album(&self, caller: &Principal, id: Uuid) -> Result<Album> {
    let album = self.fetch_album(id).await?;
    if album.owner != *caller {
      return Err(Error::PermissionDenied);
    }
    Ok(album)
  }

  /// All albums owned by the caller. Reads are owner-scoped; share links
  /// are the only way to see someone else's album.
  pub async fn albums(&self, caller: &Principal) -> Result<Vec<Album>> {
    self.store.albums_of(caller.clone()).await.map_err(store_err)
  }

  /// Rename one of the caller's albums.
  pub async fn update_album_name(
    &self,
    caller: &Principal,
    id: Uuid,
    name: String,
  ) -> Result<()> {
    require_non_empty("album name", &name)?;

    let lock = self.album_lock(id).await;
    let _guard = lock.lock().await;

    let album = self.fetch_album(id).await?;
    if album.owner != *caller {
      return Err(Error::PermissionDenied);
    }
    self.store.set_album_name(id, name).await.map_err(store_err)
  }

  /// Atomically replace an album's photo order.
  ///
  /// `new_order` must be exactly a permutation of the current membership —
  /// same multiset of ids, no additions, removals, or duplicates. Any
  /// deviation fails with [`Error::InvalidOrder`] and leaves the album
  /// untouched.
  pub async fn reorder_photos(
    &self,
    caller: &Principal,
    album_id: Uuid,
    new_order: Vec<Uuid>,
  ) -> Result<()> {
    let lock = self.album_lock(album_id).await;
    let _guard = lock.lock().await;

    let album = self.fetch_album(album_id).await?;
    if album.owner != *caller {
      return Err(Error::PermissionDenied);
    }
    if !album::is_permutation(&album.photo_ids, &new_order) {
      return Err(Error::InvalidOrder);
    }
    self
      .store
      .set_album_order(album_id, new_order)
      .await
      .map_err(store_err)?;
    tracing::debug!(album = %album_id, "photos reordered");
    Ok(())
  }

  // ── Photos ────────────────────────────────────────────────────────────

  /// Create a photo owned by the caller and, if `album_id` is given,
  /// append it to that album.
  ///
  /// Album existence and ownership are verified before the photo row is
  /// written, and validation plus both writes run under the per-album
  /// lock, so no observer can see a half-attached photo. A photo uploaded
  /// with no album stays unattached and reachable by id.
  pub async fn upload_photo(
    &self,
    caller: &Principal,
    upload: PhotoUpload,
  ) -> Result<Uuid> {
    require_non_empty("filename", &upload.filename)?;
    require_non_empty("content type", &upload.content_type)?;

    let photo = Photo {
      id:           Uuid::new_v4(),
      owner:        caller.clone(),
      blob:         upload.blob,
      content_type: upload.content_type,
      byte_size:    upload.byte_size,
      filename:     upload.filename,
      caption:      upload.caption.filter(|c| !c.trim().is_empty()),
      created_at:   chrono::Utc::now(),
    };
    let photo_id = photo.id;

    match upload.album_id {
      Some(album_id) => {
        let lock = self.album_lock(album_id).await;
        let _guard = lock.lock().await;

        let album = self.fetch_album(album_id).await?;
        if album.owner != *caller {
          return Err(Error::PermissionDenied);
        }

        self.store.insert_photo(photo).await.map_err(store_err)?;
        self
          .store
          .push_album_photo(album_id, photo_id)
          .await
          .map_err(store_err)?;
        tracing::info!(photo = %photo_id, album = %album_id, "photo uploaded");
      }
      None => {
        self.store.insert_photo(photo).await.map_err(store_err)?;
        tracing::info!(photo = %photo_id, "photo uploaded unattached");
      }
    }

    Ok(photo_id)
  }

  /// Retrieve one of the caller's own photos.
  pub async fn photo(&self, caller: &Principal, id: Uuid) -> Result<Photo> {
    let photo = self.fetch_photo(id).await?;
    if photo.owner != *caller {
      return Err(Error::PermissionDenied);
    }
    Ok(photo)
  }

  /// Batch photo retrieval. Fail-fast: if any id is missing or not owned
  /// by the caller the whole call fails and nothing partial is returned.
  pub async fn photos(
    &self,
    caller: &Principal,
    ids: &[Uuid],
  ) -> Result<Vec<Photo>> {
    let mut photos = Vec::with_capacity(ids.len());
    for &id in ids {
      photos.push(self.photo(caller, id).await?);
    }
    Ok(photos)
  }

  /// Overwrite the caption of one of the caller's photos. An empty
  /// (post-trim) caption clears it.
  pub async fn update_caption(
    &self,
    caller: &Principal,
    id: Uuid,
    caption: String,
  ) -> Result<()> {
    let photo = self.fetch_photo(id).await?;
    if photo.owner != *caller {
      return Err(Error::PermissionDenied);
    }
    let caption = Some(caption).filter(|c| !c.trim().is_empty());
    self.store.set_caption(id, caption).await.map_err(store_err)
  }

  // ── Share links ───────────────────────────────────────────────────────

  /// Issue a fresh share link for one of the caller's albums and return
  /// its token. An album may hold any number of simultaneously active
  /// links.
  pub async fn create_share_link(
    &self,
    caller: &Principal,
    album_id: Uuid,
  ) -> Result<String> {
    let album = self.fetch_album(album_id).await?;
    if album.owner != *caller {
      return Err(Error::PermissionDenied);
    }

    let link = ShareLink::issue(album_id);
    let share_id = link.share_id.clone();
    self.store.insert_share_link(link).await.map_err(store_err)?;
    tracing::info!(album = %album_id, "share link created");
    Ok(share_id)
  }

  /// Permanently revoke a share link. Only the owner of the linked album
  /// may revoke; revoking an already-revoked link is a no-op.
  pub async fn revoke_share_link(
    &self,
    caller: &Principal,
    share_id: &str,
  ) -> Result<()> {
    let link = self
      .store
      .share_link(share_id.to_owned())
      .await
      .map_err(store_err)?
      .ok_or(Error::InvalidOrExpiredLink)?;

    let album = self.fetch_album(link.album_id).await?;
    if album.owner != *caller {
      return Err(Error::PermissionDenied);
    }
    if !link.active {
      return Ok(());
    }

    self
      .store
      .deactivate_share_link(share_id.to_owned())
      .await
      .map_err(store_err)?;
    tracing::info!(album = %link.album_id, "share link revoked");
    Ok(())
  }

  /// Resolve a share token to its album. No identity is involved; the
  /// token itself is the credential.
  pub async fn shared_album(&self, share_id: &str) -> Result<Album> {
    let link = self.active_link(share_id).await?;
    self.fetch_album(link.album_id).await
  }

  /// Resolve photos through a share token. Every requested id must be a
  /// member of the linked album; a link never leaks photos outside its
  /// album's membership, even if the bearer knows another photo's id.
  pub async fn shared_photos(
    &self,
    share_id: &str,
    ids: &[Uuid],
  ) -> Result<Vec<Photo>> {
    let link = self.active_link(share_id).await?;
    let album = self.fetch_album(link.album_id).await?;

    for id in ids {
      if !album.photo_ids.contains(id) {
        return Err(Error::NotInAlbum(*id));
      }
    }

    let mut photos = Vec::with_capacity(ids.len());
    for &id in ids {
      photos.push(self.fetch_photo(id).await?);
    }
    Ok(photos)
  }

  // ── Internal helpers ──────────────────────────────────────────────────

  async fn fetch_album(&self, id: Uuid) -> Result<Album> {
    self
      .store
      .album(id)
      .await
      .map_err(store_err)?
      .ok_or(Error::AlbumNotFound(id))
  }

  async fn fetch_photo(&self, id: Uuid) -> Result<Photo> {
    self
      .store
      .photo(id)
      .await
      .map_err(store_err)?
      .ok_or(Error::PhotoNotFound(id))
  }

  async fn active_link(&self, share_id: &str) -> Result<ShareLink> {
    let link = self
      .store
      .share_link(share_id.to_owned())
      .await
      .map_err(store_err)?
      .ok_or(Error::InvalidOrExpiredLink)?;
    if !link.active {
      return Err(Error::InvalidOrExpiredLink);
    }
    Ok(link)
  }
}

//! Error types for `keepsake-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("album not found: {0}")]
  AlbumNotFound(Uuid),

  #[error("photo not found: {0}")]
  PhotoNotFound(Uuid),

  /// The caller lacks ownership of the resource or the role the operation
  /// requires.
  #[error("permission denied")]
  PermissionDenied,

  /// A reorder payload that is not a permutation of the album's current
  /// membership.
  #[error("new order is not a permutation of the current photo list")]
  InvalidOrder,

  /// The share token is unknown or has been revoked. The two cases are
  /// deliberately indistinguishable to the bearer.
  #[error("invalid or expired share link")]
  InvalidOrExpiredLink,

  /// A photo was requested through a share link but is not a member of the
  /// linked album.
  #[error("photo {0} is not in the shared album")]
  NotInAlbum(Uuid),

  #[error("validation error: {0}")]
  Validation(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

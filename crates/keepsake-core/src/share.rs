//! Share links — bearer capabilities granting read access to one album.
//!
//! Anyone presenting a valid, active share id can read the linked album and
//! its member photos with no identity check. Revocation flips `active` to
//! false permanently; revoked links are retained as tombstones, never
//! deleted, so re-revocation is well-defined and ids cannot be reused.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore as _};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entropy of a share token in bytes. 256 bits makes both guessing and
/// collision probability negligible.
const TOKEN_BYTES: usize = 32;

/// A capability token granting read-only access to one album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLink {
  pub share_id:   String,
  pub album_id:   Uuid,
  pub active:     bool,
  pub created_at: DateTime<Utc>,
}

impl ShareLink {
  /// Issue a fresh, active link for `album_id` with a new unguessable id.
  pub fn issue(album_id: Uuid) -> Self {
    Self {
      share_id: generate_share_id(),
      album_id,
      active: true,
      created_at: Utc::now(),
    }
  }
}

/// Generate a cryptographically unguessable share id: 32 bytes from the OS
/// CSPRNG, URL-safe base64 without padding.
pub fn generate_share_id() -> String {
  let mut buf = [0u8; TOKEN_BYTES];
  OsRng.fill_bytes(&mut buf);
  B64.encode(buf)
}

//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings; principals and share tokens are stored
//! verbatim.

use chrono::{DateTime, Utc};
use keepsake_core::{
  album::Album,
  identity::{Principal, UserRole},
  photo::{BlobRef, Photo},
  share::ShareLink,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── UserRole ─────────────────────────────────────────────────────────────────

pub fn encode_role(r: UserRole) -> &'static str {
  match r {
    UserRole::Admin => "admin",
    UserRole::User => "user",
    UserRole::Guest => "guest",
  }
}

pub fn decode_role(s: &str) -> Result<UserRole> {
  match s {
    "admin" => Ok(UserRole::Admin),
    "user" => Ok(UserRole::User),
    "guest" => Ok(UserRole::Guest),
    other => Err(Error::UnknownRole(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `photos` row.
pub struct RawPhoto {
  pub photo_id:     String,
  pub owner:        String,
  pub blob_handle:  String,
  pub blob_url:     String,
  pub content_type: String,
  pub byte_size:    i64,
  pub filename:     String,
  pub caption:      Option<String>,
  pub created_at:   String,
}

impl RawPhoto {
  pub fn into_photo(self) -> Result<Photo> {
    Ok(Photo {
      id:           decode_uuid(&self.photo_id)?,
      owner:        Principal::new(self.owner),
      blob:         BlobRef {
        handle:     self.blob_handle,
        direct_url: self.blob_url,
      },
      content_type: self.content_type,
      byte_size:    self.byte_size as u64,
      filename:     self.filename,
      caption:      self.caption,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read from an `albums` row, with membership ids collected
/// from `album_photos` in position order.
pub struct RawAlbum {
  pub album_id:   String,
  pub owner:      String,
  pub name:       String,
  pub created_at: String,
  pub updated_at: String,
  pub photo_ids:  Vec<String>,
}

impl RawAlbum {
  pub fn into_album(self) -> Result<Album> {
    Ok(Album {
      id:         decode_uuid(&self.album_id)?,
      owner:      Principal::new(self.owner),
      name:       self.name,
      photo_ids:  self
        .photo_ids
        .iter()
        .map(|s| decode_uuid(s))
        .collect::<Result<_>>()?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `share_links` row.
pub struct RawShareLink {
  pub share_id:   String,
  pub album_id:   String,
  pub active:     bool,
  pub created_at: String,
}

impl RawShareLink {
  pub fn into_share_link(self) -> Result<ShareLink> {
    Ok(ShareLink {
      share_id:   self.share_id,
      album_id:   decode_uuid(&self.album_id)?,
      active:     self.active,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

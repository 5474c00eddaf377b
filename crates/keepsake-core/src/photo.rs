//! Photo records and the opaque blob reference they carry.
//!
//! Raw bytes live in an external content-addressed blob store. This service
//! holds only a retrievable handle plus size/content-type metadata; it never
//! inspects or transforms the bytes themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::Principal;

/// An opaque handle into the external blob layer.
///
/// `direct_url` is the blob store's directly-fetchable URL for the bytes;
/// clients read image data from there, not through this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRef {
  pub handle:     String,
  pub direct_url: String,
}

/// A stored photo. Immutable once created except `caption`, which only the
/// owner may change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
  pub id:           Uuid,
  pub owner:        Principal,
  pub blob:         BlobRef,
  pub content_type: String,
  pub byte_size:    u64,
  pub filename:     String,
  pub caption:      Option<String>,
  /// Server-assigned; never changes after creation.
  pub created_at:   DateTime<Utc>,
}

/// Input to [`crate::Gallery::upload_photo`]. The id, owner, and creation
/// timestamp are always assigned by the service, never accepted from
/// callers.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
  /// Album to append the new photo to, or `None` for an unattached photo.
  pub album_id:     Option<Uuid>,
  pub filename:     String,
  pub content_type: String,
  pub byte_size:    u64,
  pub caption:      Option<String>,
  pub blob:         BlobRef,
}

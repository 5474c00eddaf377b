//! [`SqliteStore`] — the SQLite implementation of [`GalleryStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use keepsake_core::{
  album::Album,
  identity::{Principal, UserProfile, UserRole},
  photo::Photo,
  share::ShareLink,
  store::GalleryStore,
};

use crate::{
  Error, Result,
  encode::{
    RawAlbum, RawPhoto, RawShareLink, decode_role, encode_dt, encode_role,
    encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Keepsake store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── GalleryStore impl ───────────────────────────────────────────────────────

impl GalleryStore for SqliteStore {
  type Error = Error;

  // ── Roles ─────────────────────────────────────────────────────────────────

  async fn put_role(&self, user: Principal, role: UserRole) -> Result<()> {
    let principal = user.as_str().to_owned();
    let role_str = encode_role(role).to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO roles (principal, role) VALUES (?1, ?2)
           ON CONFLICT (principal) DO UPDATE SET role = excluded.role",
          rusqlite::params![principal, role_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn role_of(&self, user: Principal) -> Result<Option<UserRole>> {
    let principal = user.as_str().to_owned();

    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT role FROM roles WHERE principal = ?1",
              rusqlite::params![principal],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.as_deref().map(decode_role).transpose()
  }

  // ── Profiles ──────────────────────────────────────────────────────────────

  async fn put_profile(
    &self,
    user: Principal,
    profile: UserProfile,
  ) -> Result<()> {
    let principal = user.as_str().to_owned();
    let name = profile.name;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO profiles (principal, name) VALUES (?1, ?2)
           ON CONFLICT (principal) DO UPDATE SET name = excluded.name",
          rusqlite::params![principal, name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn profile_of(&self, user: Principal) -> Result<Option<UserProfile>> {
    let principal = user.as_str().to_owned();

    let name: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT name FROM profiles WHERE principal = ?1",
              rusqlite::params![principal],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(name.map(|name| UserProfile { name }))
  }

  // ── Photos ────────────────────────────────────────────────────────────────

  async fn insert_photo(&self, photo: Photo) -> Result<()> {
    let photo_id_str = encode_uuid(photo.id);
    let owner = photo.owner.as_str().to_owned();
    let blob_handle = photo.blob.handle;
    let blob_url = photo.blob.direct_url;
    let content_type = photo.content_type;
    let byte_size = photo.byte_size as i64;
    let filename = photo.filename;
    let caption = photo.caption;
    let created_at_str = encode_dt(photo.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO photos (
             photo_id, owner, blob_handle, blob_url,
             content_type, byte_size, filename, caption, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            photo_id_str,
            owner,
            blob_handle,
            blob_url,
            content_type,
            byte_size,
            filename,
            caption,
            created_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn photo(&self, id: Uuid) -> Result<Option<Photo>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPhoto> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT photo_id, owner, blob_handle, blob_url,
                      content_type, byte_size, filename, caption, created_at
               FROM photos WHERE photo_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawPhoto {
                  photo_id:     row.get(0)?,
                  owner:        row.get(1)?,
                  blob_handle:  row.get(2)?,
                  blob_url:     row.get(3)?,
                  content_type: row.get(4)?,
                  byte_size:    row.get(5)?,
                  filename:     row.get(6)?,
                  caption:      row.get(7)?,
                  created_at:   row.get(8)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPhoto::into_photo).transpose()
  }

  async fn set_caption(&self, id: Uuid, caption: Option<String>) -> Result<()> {
    let id_str = encode_uuid(id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE photos SET caption = ?2 WHERE photo_id = ?1",
          rusqlite::params![id_str, caption],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Albums ────────────────────────────────────────────────────────────────

  async fn insert_album(&self, album: Album) -> Result<()> {
    let album_id_str = encode_uuid(album.id);
    let owner = album.owner.as_str().to_owned();
    let name = album.name;
    let created_at_str = encode_dt(album.created_at);
    let updated_at_str = encode_dt(album.updated_at);
    let member_strs: Vec<String> =
      album.photo_ids.iter().copied().map(encode_uuid).collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO albums (album_id, owner, name, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            album_id_str,
            owner,
            name,
            created_at_str,
            updated_at_str,
          ],
        )?;
        for (position, photo_id) in member_strs.iter().enumerate() {
          tx.execute(
            "INSERT INTO album_photos (album_id, photo_id, position)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![album_id_str, photo_id, position as i64],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn album(&self, id: Uuid) -> Result<Option<Album>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawAlbum> = self
      .conn
      .call(move |conn| {
        let header = conn
          .query_row(
            "SELECT album_id, owner, name, created_at, updated_at
             FROM albums WHERE album_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
              ))
            },
          )
          .optional()?;

        let Some((album_id, owner, name, created_at, updated_at)) = header
        else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(
          "SELECT photo_id FROM album_photos
           WHERE album_id = ?1 ORDER BY position",
        )?;
        let photo_ids = stmt
          .query_map(rusqlite::params![album_id], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(Some(RawAlbum {
          album_id,
          owner,
          name,
          created_at,
          updated_at,
          photo_ids,
        }))
      })
      .await?;

    raw.map(RawAlbum::into_album).transpose()
  }

  async fn albums_of(&self, owner: Principal) -> Result<Vec<Album>> {
    let owner_str = owner.as_str().to_owned();

    let raws: Vec<RawAlbum> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT album_id, owner, name, created_at, updated_at
           FROM albums WHERE owner = ?1 ORDER BY created_at",
        )?;
        let headers = stmt
          .query_map(rusqlite::params![owner_str], |row| {
            Ok((
              row.get::<_, String>(0)?,
              row.get::<_, String>(1)?,
              row.get::<_, String>(2)?,
              row.get::<_, String>(3)?,
              row.get::<_, String>(4)?,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut members_stmt = conn.prepare(
          "SELECT photo_id FROM album_photos
           WHERE album_id = ?1 ORDER BY position",
        )?;

        let mut raws = Vec::with_capacity(headers.len());
        for (album_id, owner, name, created_at, updated_at) in headers {
          let photo_ids = members_stmt
            .query_map(rusqlite::params![album_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
          raws.push(RawAlbum {
            album_id,
            owner,
            name,
            created_at,
            updated_at,
            photo_ids,
          });
        }
        Ok(raws)
      })
      .await?;

    raws.into_iter().map(RawAlbum::into_album).collect()
  }

  async fn set_album_name(&self, id: Uuid, name: String) -> Result<()> {
    let id_str = encode_uuid(id);
    let updated_at_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE albums SET name = ?2, updated_at = ?3 WHERE album_id = ?1",
          rusqlite::params![id_str, name, updated_at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn set_album_order(&self, id: Uuid, photo_ids: Vec<Uuid>) -> Result<()> {
    let id_str = encode_uuid(id);
    let member_strs: Vec<String> =
      photo_ids.into_iter().map(encode_uuid).collect();
    let updated_at_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM album_photos WHERE album_id = ?1",
          rusqlite::params![id_str],
        )?;
        for (position, photo_id) in member_strs.iter().enumerate() {
          tx.execute(
            "INSERT INTO album_photos (album_id, photo_id, position)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![id_str, photo_id, position as i64],
          )?;
        }
        tx.execute(
          "UPDATE albums SET updated_at = ?2 WHERE album_id = ?1",
          rusqlite::params![id_str, updated_at_str],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn push_album_photo(&self, album_id: Uuid, photo_id: Uuid) -> Result<()> {
    let album_id_str = encode_uuid(album_id);
    let photo_id_str = encode_uuid(photo_id);
    let updated_at_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let next_position: i64 = tx.query_row(
          "SELECT COALESCE(MAX(position) + 1, 0) FROM album_photos
           WHERE album_id = ?1",
          rusqlite::params![album_id_str],
          |row| row.get(0),
        )?;
        tx.execute(
          "INSERT INTO album_photos (album_id, photo_id, position)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![album_id_str, photo_id_str, next_position],
        )?;
        tx.execute(
          "UPDATE albums SET updated_at = ?2 WHERE album_id = ?1",
          rusqlite::params![album_id_str, updated_at_str],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Share links ───────────────────────────────────────────────────────────

  async fn insert_share_link(&self, link: ShareLink) -> Result<()> {
    let share_id = link.share_id;
    let album_id_str = encode_uuid(link.album_id);
    let active = link.active;
    let created_at_str = encode_dt(link.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO share_links (share_id, album_id, active, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![share_id, album_id_str, active, created_at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn share_link(&self, share_id: String) -> Result<Option<ShareLink>> {
    let raw: Option<RawShareLink> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT share_id, album_id, active, created_at
               FROM share_links WHERE share_id = ?1",
              rusqlite::params![share_id],
              |row| {
                Ok(RawShareLink {
                  share_id:   row.get(0)?,
                  album_id:   row.get(1)?,
                  active:     row.get(2)?,
                  created_at: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawShareLink::into_share_link).transpose()
  }

  async fn deactivate_share_link(&self, share_id: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE share_links SET active = 0 WHERE share_id = ?1",
          rusqlite::params![share_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

//! SQL schema for the Keepsake SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS roles (
    principal TEXT PRIMARY KEY,
    role      TEXT NOT NULL    -- 'admin' | 'user' | 'guest'
);

CREATE TABLE IF NOT EXISTS profiles (
    principal TEXT PRIMARY KEY,
    name      TEXT NOT NULL
);

-- Photos are immutable except for caption.
CREATE TABLE IF NOT EXISTS photos (
    photo_id     TEXT PRIMARY KEY,
    owner        TEXT NOT NULL,
    blob_handle  TEXT NOT NULL,   -- opaque handle into the external blob layer
    blob_url     TEXT NOT NULL,   -- directly fetchable URL for the bytes
    content_type TEXT NOT NULL,
    byte_size    INTEGER NOT NULL,
    filename     TEXT NOT NULL,
    caption      TEXT,
    created_at   TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS albums (
    album_id   TEXT PRIMARY KEY,
    owner      TEXT NOT NULL,
    name       TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Ordered album membership. The composite primary key rules out duplicate
-- membership at the storage layer as well.
CREATE TABLE IF NOT EXISTS album_photos (
    album_id TEXT NOT NULL REFERENCES albums(album_id),
    photo_id TEXT NOT NULL REFERENCES photos(photo_id),
    position INTEGER NOT NULL,
    PRIMARY KEY (album_id, photo_id)
);

-- Revoked links are tombstoned (active = 0), never deleted.
CREATE TABLE IF NOT EXISTS share_links (
    share_id   TEXT PRIMARY KEY,
    album_id   TEXT NOT NULL REFERENCES albums(album_id),
    active     INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS photos_owner_idx       ON photos(owner);
CREATE INDEX IF NOT EXISTS albums_owner_idx       ON albums(owner);
CREATE INDEX IF NOT EXISTS album_photos_album_idx ON album_photos(album_id);
CREATE INDEX IF NOT EXISTS share_links_album_idx  ON share_links(album_id);

PRAGMA user_version = 1;
";

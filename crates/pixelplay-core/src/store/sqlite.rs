//! SQLite-backed collection store.
//!
//! Each operation opens its own connection and drops it before returning, on
//! success and error paths alike. Nothing is cached between calls, so several
//! `CollectionStore` values (or processes) may point at the same file and
//! SQLite's own locking decides who writes when.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use super::entry::{CollectionEntry, LoadReport, StoredRow};
use super::StoreError;
use crate::decode::PixelBuffer;
use crate::encode::encode_png;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS images (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        caption TEXT NOT NULL,
        image_data BLOB NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
    );
";

const SELECT_ALL: &str = "
    SELECT id, caption, image_data, created_at
    FROM images
    ORDER BY created_at DESC, id DESC
";

/// Persistent collection of captioned images.
#[derive(Debug, Clone)]
pub struct CollectionStore {
    path: PathBuf,
}

impl CollectionStore {
    /// Open or create the store at `location`.
    ///
    /// Creates the `images` table if it does not exist yet. Calling this on
    /// an already initialized file changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::StorageUnavailable` if the file cannot be opened
    /// or the schema cannot be created.
    pub fn initialize(location: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = Self {
            path: location.as_ref().to_path_buf(),
        };
        let conn = store.connect()?;
        conn.execute_batch(SCHEMA)?;
        debug!(path = %store.path.display(), "collection store ready");
        Ok(store)
    }

    /// Location of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save an image with its caption and return the new entry's id.
    ///
    /// The image is stored as PNG, so it loads back bit for bit. The caption
    /// is stored verbatim, including an empty caption.
    #[tracing::instrument(level = "debug", skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn save(&self, image: &PixelBuffer, caption: &str) -> Result<i64, StoreError> {
        let bytes = encode_png(image)?;
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO images (caption, image_data) VALUES (?1, ?2)",
            params![caption, bytes],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, bytes = bytes.len(), "saved image");
        Ok(id)
    }

    /// Load every entry, most recent first.
    ///
    /// # Errors
    ///
    /// Fails with `StoreError::CorruptEntry` on the first entry whose image
    /// cannot be decoded. Use [`load_all_lossy`](Self::load_all_lossy) to
    /// skip such entries instead.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load_all(&self) -> Result<Vec<CollectionEntry>, StoreError> {
        self.read_rows()?
            .into_iter()
            .map(|row| {
                row.decode().map_err(|skipped| StoreError::CorruptEntry {
                    id: skipped.id,
                    source: skipped.error,
                })
            })
            .collect()
    }

    /// Load every readable entry, most recent first, skipping corrupt ones.
    ///
    /// Each skipped entry is logged as a warning and listed in
    /// [`LoadReport::corrupt`].
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load_all_lossy(&self) -> Result<LoadReport, StoreError> {
        let mut report = LoadReport::default();
        for row in self.read_rows()? {
            match row.decode() {
                Ok(entry) => report.entries.push(entry),
                Err(skipped) => {
                    warn!(id = skipped.id, error = %skipped.error, "skipping corrupt collection entry");
                    report.corrupt.push(skipped);
                }
            }
        }
        Ok(report)
    }

    /// Load a single entry by id.
    ///
    /// Returns `Ok(None)` if no entry has that id.
    pub fn get(&self, id: i64) -> Result<Option<CollectionEntry>, StoreError> {
        let conn = self.connect()?;
        let row = conn
            .query_row(
                "SELECT id, caption, image_data, created_at FROM images WHERE id = ?1",
                params![id],
                StoredRow::from_row,
            )
            .optional()?;

        row.map(|row| {
            row.decode().map_err(|skipped| StoreError::CorruptEntry {
                id: skipped.id,
                source: skipped.error,
            })
        })
        .transpose()
    }

    /// Delete the entry with the given id.
    ///
    /// Deleting an id that does not exist is not an error. The returned flag
    /// tells whether an entry was actually removed.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM images WHERE id = ?1", params![id])?;
        if removed == 0 {
            debug!(id, "delete of missing entry ignored");
        }
        Ok(removed > 0)
    }

    /// Number of stored entries.
    pub fn count(&self) -> Result<u64, StoreError> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    fn read_rows(&self) -> Result<Vec<StoredRow>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(SELECT_ALL)?;
        let rows = stmt
            .query_map([], StoredRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

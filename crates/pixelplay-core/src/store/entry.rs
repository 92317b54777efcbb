//! Records returned by the collection store.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::decode::{decode_png, DecodeError, PixelBuffer};

/// A saved image with its caption.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionEntry {
    /// Identifier assigned by the store; never reused.
    pub id: i64,
    /// Caption exactly as it was saved (may be empty).
    pub caption: String,
    /// The decoded image.
    pub image: PixelBuffer,
    /// When the entry was saved (UTC).
    pub created_at: DateTime<Utc>,
}

/// An entry whose stored bytes could not be decoded.
#[derive(Debug)]
pub struct SkippedEntry {
    pub id: i64,
    pub error: DecodeError,
}

/// Result of a lossy load: every readable entry plus the ones that were skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Readable entries, most recent first.
    pub entries: Vec<CollectionEntry>,
    /// Entries skipped because their image data is corrupt.
    pub corrupt: Vec<SkippedEntry>,
}

impl LoadReport {
    /// True if no entry had to be skipped.
    pub fn is_complete(&self) -> bool {
        self.corrupt.is_empty()
    }
}

/// A row as read from the `images` table, before decoding.
pub(crate) struct StoredRow {
    pub id: i64,
    pub caption: String,
    pub image_data: Vec<u8>,
    pub created_at: NaiveDateTime,
}

impl StoredRow {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            caption: row.get("caption")?,
            image_data: row.get("image_data")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Decode the stored PNG into a collection entry.
    pub(crate) fn decode(self) -> Result<CollectionEntry, SkippedEntry> {
        match decode_png(&self.image_data) {
            Ok(image) => Ok(CollectionEntry {
                id: self.id,
                caption: self.caption,
                image,
                created_at: self.created_at.and_utc(),
            }),
            Err(error) => Err(SkippedEntry { id: self.id, error }),
        }
    }
}

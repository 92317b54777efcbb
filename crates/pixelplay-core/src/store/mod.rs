//! Persisted collection of captioned images.
//!
//! Images are stored losslessly as PNG in a single SQLite table:
//!
//! ```text
//! images(id INTEGER PRIMARY KEY AUTOINCREMENT,
//!        caption TEXT NOT NULL,
//!        image_data BLOB NOT NULL,
//!        created_at TIMESTAMP NOT NULL DEFAULT <insertion time, UTC, ms>)
//! ```
//!
//! Entries are immutable once saved. Listing order is `created_at`
//! descending, then `id` descending.
//!
//! # Error Policies
//!
//! - [`CollectionStore::delete`] on a missing id is a no-op
//! - [`CollectionStore::load_all`] fails on the first corrupt entry;
//!   [`CollectionStore::load_all_lossy`] skips and reports it instead

mod entry;
mod sqlite;

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

pub use entry::{CollectionEntry, LoadReport, SkippedEntry};
pub use sqlite::CollectionStore;

/// Default database file name.
pub const DEFAULT_DATABASE_FILE: &str = "image_collection.db";

/// Errors returned by the collection store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing database could not be opened, read or written.
    #[error("Collection store unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),

    /// A stored image could not be decoded.
    #[error("Collection entry {id} is corrupt: {source}")]
    CorruptEntry {
        id: i64,
        #[source]
        source: DecodeError,
    },

    /// The image could not be encoded for storage.
    #[error("Could not encode image for storage: {0}")]
    Encode(#[from] EncodeError),
}

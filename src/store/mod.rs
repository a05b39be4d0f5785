//! Time-partitioned document storage.
//!
//! Rendered pages are written under `{root}/{year}/{month:02}/{uuid}.pdf`,
//! the partition taken from the wall clock in the configured timezone. The
//! store owns the bytes on disk; callers keep only the returned identifier and
//! relative path.
//!
//! All operations block on filesystem I/O. Callers on an async runtime should
//! move them to a blocking worker.

mod path;

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, FixedOffset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, trace};
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::{Result, StickerError};

pub use path::{resolve_within, validate_relative};

/// File extension of stored documents.
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// Receipt for a saved document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub document_id: Uuid,
    /// Path below the storage root, always `/`-separated.
    pub relative_path: String,
    pub created_at: DateTime<FixedOffset>,
    pub size_bytes: u64,
    /// Hex SHA-256 of the stored bytes.
    pub sha256: String,
}

/// Relative location of a document created at `at`.
pub fn partition_path(at: &DateTime<Tz>, document_id: &Uuid) -> String {
    format!(
        "{}/{:02}/{document_id}.{DOCUMENT_EXTENSION}",
        at.year(),
        at.month()
    )
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
    timezone: Tz,
}

impl DocumentStore {
    /// Create a store over an existing root directory.
    pub fn new(root: impl Into<PathBuf>, timezone: Tz) -> Self {
        Self {
            root: root.into(),
            timezone,
        }
    }

    /// Create a store from configuration, creating the root if missing.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        let timezone = config.timezone()?;
        fs::create_dir_all(&config.root).map_err(|e| StickerError::storage(&config.root, e))?;
        debug!(root = %config.root.display(), %timezone, "Opened document store");
        Ok(Self::new(config.root.clone(), timezone))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Persist `bytes` under a fresh identifier, partitioned by the current time.
    pub fn save(&self, bytes: &[u8]) -> Result<StoredDocument> {
        self.save_at(bytes, Utc::now().with_timezone(&self.timezone))
    }

    /// Persist `bytes` as if saved at `at`.
    ///
    /// The file becomes visible only once fully written; an existing file at
    /// the target path is never replaced.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn save_at(&self, bytes: &[u8], at: DateTime<Tz>) -> Result<StoredDocument> {
        let document_id = Uuid::new_v4();
        let relative_path = partition_path(&at, &document_id);
        let target = self.root.join(&relative_path);
        let dir = target
            .parent()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        // create_dir_all tolerates a concurrent creator winning the race
        fs::create_dir_all(&dir).map_err(|e| StickerError::storage(&dir, e))?;
        write_new_file(&dir, &target, bytes)?;

        let sha256 = hex::encode(Sha256::digest(bytes));
        info!(%document_id, path = %relative_path, "Stored document");
        Ok(StoredDocument {
            document_id,
            relative_path,
            created_at: at.fixed_offset(),
            size_bytes: bytes.len() as u64,
            sha256,
        })
    }

    /// Read the document stored at `relative`.
    #[instrument(skip(self))]
    pub fn load(&self, relative: &str) -> Result<Vec<u8>> {
        let path = resolve_within(&self.root, relative)?;
        match fs::read(&path) {
            Ok(bytes) => {
                debug!(len = bytes.len(), "Loaded document");
                Ok(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StickerError::DocumentNotFound {
                path: relative.to_string(),
            }),
            Err(e) => Err(StickerError::storage(&path, e)),
        }
    }

    /// Remove the document at `relative`; returns whether a file was removed.
    #[instrument(skip(self))]
    pub fn delete(&self, relative: &str) -> Result<bool> {
        let path = resolve_within(&self.root, relative)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted document");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Document already absent");
                Ok(false)
            }
            Err(e) => Err(StickerError::storage(&path, e)),
        }
    }

    pub fn exists(&self, relative: &str) -> Result<bool> {
        let path = resolve_within(&self.root, relative)?;
        Ok(path.is_file())
    }
}

/// Write through a temp file in `dir`, then link it into place without clobbering.
fn write_new_file(dir: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StickerError::storage(dir, e))?;
    tmp.write_all(bytes)
        .map_err(|e| StickerError::storage(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StickerError::storage(tmp.path(), e))?;
    tmp.persist_noclobber(target)
        .map_err(|e| StickerError::storage(target, e.error))?;

    match File::open(dir).and_then(|handle| handle.sync_all()) {
        Ok(()) => trace!(dir = %dir.display(), "Synced directory"),
        Err(e) => debug!(dir = %dir.display(), error = %e, "Directory sync failed"),
    }
    Ok(())
}

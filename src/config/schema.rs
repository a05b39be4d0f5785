//! Settings schema.

use std::path::PathBuf;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StickerError};
use crate::layout::LayoutConfig;

/// Default storage root, relative to the config file directory.
pub const DEFAULT_STORAGE_DIR: &str = "storage/stickers";
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Where and in which timezone documents are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub root: PathBuf,
    /// IANA zone name used for the year/month partition.
    pub timezone: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_STORAGE_DIR),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl StorageConfig {
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .trim()
            .parse::<Tz>()
            .map_err(|_| StickerError::UnknownTimezone {
                name: self.timezone.clone(),
            })
    }
}

/// Complete settings for the renderer and the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub storage: StorageConfig,
    pub layout: LayoutConfig,
}

impl Settings {
    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.storage.timezone()?;
        if self.storage.root.as_os_str().is_empty() {
            return Err(StickerError::ConfigInvalid(
                "storage.root must not be empty".to_string(),
            ));
        }
        self.layout.validate()
    }
}

//! Error types for sticker rendering and document storage.

use thiserror::Error;

/// Broad failure category, stable across variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    ImageDecode,
    NotFound,
    InvalidPath,
    StorageIo,
    Config,
    Other,
}

/// Primary error type for sticker operations.
#[derive(Error, Debug)]
pub enum StickerError {
    // Input errors
    #[error("Too many stickers: got {count}, a page holds at most {max}")]
    TooManyStickers { count: usize, max: usize },

    #[error("Invalid value for {field} in sticker {index}: {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Invalid lab reference number '{value}': {reason}")]
    InvalidRefNo { value: String, reason: String },

    #[error("Cannot read stickers from {path}: {reason}")]
    InvalidInputFile { path: String, reason: String },

    #[error("Conflicting options: {0}")]
    ConflictingOptions(String),

    // Image errors
    #[error("Logo for sticker {index} could not be decoded: {reason}")]
    ImageDecode { index: usize, reason: String },

    #[error("Logo re-encoding failed: {0}")]
    ImageEncode(String),

    // Storage errors
    #[error("Document not found: {path}")]
    DocumentNotFound { path: String },

    #[error("Invalid document path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("Storage failure at {path}: {source}")]
    StorageIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // Canvas workflow errors
    #[error("Sticker canvas {id} not found")]
    CanvasNotFound { id: i64 },

    #[error("Sticker canvas {id} has no stickers")]
    EmptyCanvas { id: i64 },

    #[error("Sticker canvas {id} has no generated document")]
    NoDocument { id: i64 },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Cannot access configuration file {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Unknown timezone '{name}'")]
    UnknownTimezone { name: String },

    // Output errors
    #[error("PDF serialization failed: {0}")]
    PdfWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StickerError {
    /// Category this error belongs to.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TooManyStickers { .. }
            | Self::InvalidField { .. }
            | Self::InvalidRefNo { .. }
            | Self::InvalidInputFile { .. }
            | Self::ConflictingOptions(_)
            | Self::EmptyCanvas { .. } => ErrorKind::InvalidInput,
            Self::ImageDecode { .. } | Self::ImageEncode(_) => ErrorKind::ImageDecode,
            Self::DocumentNotFound { .. } | Self::CanvasNotFound { .. } | Self::NoDocument { .. } => {
                ErrorKind::NotFound
            }
            Self::InvalidPath { .. } => ErrorKind::InvalidPath,
            Self::StorageIo { .. } | Self::Io(_) => ErrorKind::StorageIo,
            Self::ConfigNotFound { .. }
            | Self::ConfigIo { .. }
            | Self::ConfigParse(_)
            | Self::ConfigInvalid(_)
            | Self::UnknownTimezone { .. } => ErrorKind::Config,
            Self::PdfWrite(_) => ErrorKind::Other,
        }
    }

    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TooManyStickers { .. }
                | Self::InvalidField { .. }
                | Self::InvalidRefNo { .. }
                | Self::InvalidInputFile { .. }
                | Self::ConflictingOptions(_)
                | Self::ImageDecode { .. }
                | Self::DocumentNotFound { .. }
                | Self::InvalidPath { .. }
                | Self::ConfigNotFound { .. }
                | Self::UnknownTimezone { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::TooManyStickers { .. } => Some("Split the stickers across several pages"),
            Self::InvalidInputFile { .. } => {
                Some("Provide a .json, .yaml or .toml list of stickers, or {stickers: [...]}")
            }
            Self::ImageDecode { .. } => Some("Use a PNG or JPEG logo"),
            Self::InvalidPath { .. } => {
                Some("Pass the relative path returned by save, e.g. 2026/01/<id>.pdf")
            }
            Self::ConfigNotFound { .. } => Some("Run: stickers config init"),
            Self::UnknownTimezone { .. } => Some("Use an IANA zone name such as Asia/Manila"),
            _ => None,
        }
    }

    /// Wrap an I/O failure at `path`.
    pub fn storage(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::StorageIo {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Convenience type alias for Results using StickerError.
pub type Result<T> = std::result::Result<T, StickerError>;

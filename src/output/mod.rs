//! Output mode abstraction for robot and human output.

use std::path::Path;

use serde::Serialize;

use crate::cli::Cli;
use crate::config::Settings;
use crate::error::StickerError;
use crate::store::StoredDocument;

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

/// Result of a `render` run.
#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    pub stickers: usize,
    pub bytes: usize,
    /// File the PDF was written to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<StoredDocument>,
}

/// Build metadata shown by `version`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo<'a> {
    pub version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_time: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rustc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<&'a str>,
}

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    /// JSON output for scripts and agents.
    Robot(RobotFormat),
    /// Styled terminal output for people.
    Human { color: bool },
}

impl OutputMode {
    /// Create OutputMode from CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            let format = if cli.use_compact_json() {
                RobotFormat::JsonCompact
            } else {
                RobotFormat::Json
            };
            Self::Robot(format)
        } else {
            Self::Human {
                color: !cli.no_color,
            }
        }
    }

    #[must_use]
    pub const fn is_robot(&self) -> bool {
        matches!(self, Self::Robot(_))
    }

    /// Convert into the appropriate Output implementation.
    #[must_use]
    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human { color } => Box::new(HumanOutput::new(color)),
        }
    }
}

/// Trait for all output operations.
///
/// Commands call these methods without knowing the output mode. Raw document
/// bytes never pass through here.
pub trait Output {
    // Basic messages
    fn success(&self, message: &str);
    fn error(&self, error: &StickerError);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);

    // Documents
    fn rendered(&self, report: &RenderReport);
    fn stored(&self, document: &StoredDocument);
    fn loaded(&self, relative: &str, bytes: usize, destination: &Path);
    fn deleted(&self, relative: &str, removed: bool);

    // Reference numbers
    fn ref_no(&self, value: &str);

    // Settings
    fn settings(&self, settings: &Settings, source: Option<&Path>);
    fn config_path(&self, path: &Path, exists: bool);

    // Metadata
    fn version_info(&self, info: &VersionInfo<'_>);
}

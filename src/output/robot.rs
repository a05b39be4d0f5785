//! Robot mode JSON output implementation.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument, trace, warn};

use crate::config::Settings;
use crate::error::StickerError;
use crate::store::StoredDocument;

use super::{Output, RenderReport, RobotFormat, VersionInfo};

/// JSON output implementation for AI agents and scripting.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    /// Output any serializable data as JSON to stdout.
    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        let json = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        match json {
            Ok(json) => {
                trace!(json_len = json.len(), "JSON serialized");
                println!("{json}");
            }
            Err(e) => warn!(error = %e, "Failed to serialize output"),
        }
    }
}

impl Output for RobotOutput {
    fn success(&self, message: &str) {
        self.output_json(&serde_json::json!({
            "success": true,
            "message": message
        }));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &StickerError) {
        debug!(error = %error, "Robot: error");
        let body = serde_json::json!({
            "error": true,
            "kind": error.kind(),
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        match serde_json::to_string_pretty(&body) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{error}"),
        }
    }

    fn warning(&self, message: &str) {
        self.output_json(&serde_json::json!({
            "warning": true,
            "message": message
        }));
    }

    fn info(&self, message: &str) {
        self.output_json(&serde_json::json!({
            "info": true,
            "message": message
        }));
    }

    fn rendered(&self, report: &RenderReport) {
        self.output_json(report);
    }

    fn stored(&self, document: &StoredDocument) {
        self.output_json(document);
    }

    fn loaded(&self, relative: &str, bytes: usize, destination: &Path) {
        self.output_json(&serde_json::json!({
            "relative_path": relative,
            "bytes": bytes,
            "output": destination.display().to_string(),
        }));
    }

    fn deleted(&self, relative: &str, removed: bool) {
        self.output_json(&serde_json::json!({
            "relative_path": relative,
            "deleted": removed,
        }));
    }

    fn ref_no(&self, value: &str) {
        self.output_json(&serde_json::json!({ "lab_ref_no": value }));
    }

    fn settings(&self, settings: &Settings, source: Option<&Path>) {
        self.output_json(&serde_json::json!({
            "source": source.map(|p| p.display().to_string()),
            "settings": settings,
        }));
    }

    fn config_path(&self, path: &Path, exists: bool) {
        self.output_json(&serde_json::json!({
            "path": path.display().to_string(),
            "exists": exists,
        }));
    }

    fn version_info(&self, info: &VersionInfo<'_>) {
        self.output_json(info);
    }
}

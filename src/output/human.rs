//! Human-friendly output using `console` styling.

use std::path::Path;

use tracing::{debug, instrument};

use crate::config::Settings;
use crate::error::StickerError;
use crate::store::StoredDocument;
use crate::theme::StickerTheme;

use super::{Output, RenderReport, VersionInfo};

/// Styled terminal output for people.
pub struct HumanOutput {
    theme: StickerTheme,
}

impl HumanOutput {
    #[instrument]
    pub fn new(color: bool) -> Self {
        debug!(color, "Creating HumanOutput");
        if !color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        Self {
            theme: StickerTheme::default(),
        }
    }

    fn field(&self, label: &str, value: impl std::fmt::Display) {
        println!(
            "  {} {}",
            self.theme.label.apply_to(format!("{label:<12}")),
            self.theme.value.apply_to(value)
        );
    }

    fn document(&self, document: &StoredDocument) {
        self.field("Document", document.document_id);
        println!(
            "  {} {}",
            self.theme.label.apply_to(format!("{:<12}", "Path")),
            self.theme.path.apply_to(&document.relative_path)
        );
        self.field("Created", document.created_at.to_rfc3339());
        self.field("Size", format!("{} bytes", document.size_bytes));
        println!(
            "  {} {}",
            self.theme.label.apply_to(format!("{:<12}", "SHA-256")),
            self.theme.muted.apply_to(&document.sha256)
        );
    }
}

impl Output for HumanOutput {
    fn success(&self, message: &str) {
        println!("{} {message}", self.theme.success.apply_to("[OK]"));
    }

    fn error(&self, error: &StickerError) {
        eprintln!(
            "{} {}",
            self.theme.error.apply_to("[ERR]"),
            console::style(error).bold()
        );
        if let Some(suggestion) = error.suggestion() {
            eprintln!(
                "  {} {}",
                self.theme.label.apply_to("Suggestion:"),
                self.theme.muted.apply_to(suggestion)
            );
        }
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {message}", self.theme.warning.apply_to("[WARN]"));
    }

    fn info(&self, message: &str) {
        println!("{} {message}", self.theme.accent.apply_to("[INFO]"));
    }

    fn rendered(&self, report: &RenderReport) {
        let noun = if report.stickers == 1 { "sticker" } else { "stickers" };
        self.success(&format!(
            "Rendered {} {noun} ({} bytes)",
            report.stickers, report.bytes
        ));
        if let Some(output) = &report.output {
            println!(
                "  {} {}",
                self.theme.label.apply_to(format!("{:<12}", "Written to")),
                self.theme.path.apply_to(output)
            );
        }
        if let Some(stored) = &report.stored {
            self.document(stored);
        }
    }

    fn stored(&self, document: &StoredDocument) {
        self.success("Stored document");
        self.document(document);
    }

    fn loaded(&self, relative: &str, bytes: usize, destination: &Path) {
        self.success(&format!(
            "Loaded {relative} ({bytes} bytes) into {}",
            destination.display()
        ));
    }

    fn deleted(&self, relative: &str, removed: bool) {
        if removed {
            self.success(&format!("Deleted {relative}"));
        } else {
            self.warning(&format!("{relative} was already absent"));
        }
    }

    fn ref_no(&self, value: &str) {
        println!("{}", self.theme.value.apply_to(value));
    }

    fn settings(&self, settings: &Settings, source: Option<&Path>) {
        let source = source.map_or_else(
            || "built-in defaults".to_string(),
            |p| p.display().to_string(),
        );
        println!(
            "{} {}",
            self.theme.accent.apply_to("Settings from"),
            self.theme.path.apply_to(source)
        );
        match toml::to_string_pretty(settings) {
            Ok(text) => println!("{text}"),
            Err(e) => self.warning(&format!("Could not format settings: {e}")),
        }
    }

    fn config_path(&self, path: &Path, exists: bool) {
        let state = if exists { "" } else { " (not created)" };
        println!(
            "{}{}",
            self.theme.path.apply_to(path.display()),
            self.theme.muted.apply_to(state)
        );
    }

    fn version_info(&self, info: &VersionInfo<'_>) {
        println!(
            "{} {}",
            self.theme.accent.apply_to("stickers"),
            self.theme.value.apply_to(info.version)
        );
        let rows = [
            ("Commit", info.git_sha),
            ("Built", info.build_time),
            ("Rustc", info.rustc),
            ("Target", info.target),
        ];
        for (label, value) in rows {
            if let Some(value) = value {
                self.field(label, value);
            }
        }
    }
}

//! Settings file discovery, parsing and environment overrides.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, trace};

use crate::error::{Result, StickerError};

use super::path::{default_config_path, resolve_path};
use super::schema::Settings;

/// Overrides `storage.root`.
pub const ENV_STORAGE_DIR: &str = "STICKERS_STORAGE_DIR";
/// Overrides `storage.timezone`.
pub const ENV_TIMEZONE: &str = "STICKERS_TIMEZONE";

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml).
    Yaml,
    /// TOML format (.toml).
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        trace!(extension = %ext, "Detecting config format from extension");
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Settings together with the file they came from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    /// `None` when built-in defaults were used.
    pub source: Option<PathBuf>,
}

fn config_io(path: &Path, source: std::io::Error) -> StickerError {
    StickerError::ConfigIo {
        path: path.display().to_string(),
        source,
    }
}

/// Commented default configuration written by `config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# lab-stickers configuration

[storage]
# Root directory for rendered documents. Relative paths are resolved
# against the directory containing this file.
root = "storage/stickers"
# IANA timezone used for the year/month folders.
timezone = "UTC"

[layout]
# All dimensions are PDF points (1/72 inch).
margin = 20.0
font_size = 10.0
line_height = 14.0
left_padding = 12.0
label_gap = 4.0
text_top_inset = 14.0
logo_width = 120.0
logo_height = 50.0
logo_top_inset = 5.0
logo_text_gap = 16.0
grid_gray = 0.827
grid_line_width = 0.5
# Print the NOTE field after QUANTITY.
include_note = false
# "allow" lets long text cross the cell border, "clip" crops it.
overflow = "allow"
"#;

/// Parse settings text in the given format. Paths are left as written.
pub fn parse_settings(content: &str, format: ConfigFormat) -> Result<Settings> {
    let settings: Settings = match format {
        ConfigFormat::Yaml => {
            // An empty YAML document deserializes as unit, not as an empty map
            if content.trim().is_empty() {
                Settings::default()
            } else {
                serde_yaml::from_str(content)
                    .map_err(|e| StickerError::ConfigParse(format!("YAML: {e}")))?
            }
        }
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| StickerError::ConfigParse(format!("TOML: {e}")))?
        }
    };
    Ok(settings)
}

/// Load a settings file, resolving the storage root against its directory.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let format = ConfigFormat::from_extension(path).ok_or_else(|| {
        StickerError::ConfigParse(format!(
            "Unknown config format for '{}': expected .yaml, .yml, or .toml",
            path.display()
        ))
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StickerError::ConfigNotFound {
                path: path.display().to_string(),
            }
        } else {
            config_io(path, e)
        }
    })?;
    debug!(bytes = content.len(), ?format, "Read config file");

    let mut settings = parse_settings(&content, format)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    settings.storage.root = resolve_path(&settings.storage.root, base)?;
    Ok(settings)
}

/// Apply `STICKERS_*` overrides read through `lookup`.
///
/// A relative storage directory from the environment resolves against `cwd`.
pub fn apply_overrides<F>(settings: &mut Settings, cwd: &Path, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(ENV_STORAGE_DIR).filter(|v| !v.trim().is_empty()) {
        settings.storage.root = resolve_path(Path::new(dir.trim()), cwd)?;
        debug!(root = %settings.storage.root.display(), "Storage root from environment");
    }
    if let Some(tz) = lookup(ENV_TIMEZONE).filter(|v| !v.trim().is_empty()) {
        debug!(timezone = %tz, "Timezone from environment");
        settings.storage.timezone = tz.trim().to_string();
    }
    Ok(())
}

/// Locate, read and validate the effective settings.
///
/// `explicit` (from `--config` or `STICKERS_CONFIG`) must exist. Otherwise the
/// platform default file is used when present, else built-in defaults.
#[instrument(skip_all)]
pub fn load_settings(explicit: Option<&Path>) -> Result<LoadedSettings> {
    let cwd = std::env::current_dir()?;

    let (mut settings, source) = match explicit {
        Some(path) => (load_settings_file(path)?, Some(path.to_path_buf())),
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => (load_settings_file(&path)?, Some(path)),
            None => {
                let mut settings = Settings::default();
                settings.storage.root = resolve_path(&settings.storage.root, &cwd)?;
                (settings, None)
            }
        },
    };

    apply_overrides(&mut settings, &cwd, |key| std::env::var(key).ok())?;
    settings.validate()?;

    info!(
        source = ?source,
        root = %settings.storage.root.display(),
        timezone = %settings.storage.timezone,
        "Settings loaded"
    );
    Ok(LoadedSettings { settings, source })
}

/// Write the default template to `path`, refusing to replace an existing file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(StickerError::ConfigInvalid(format!(
            "{} already exists",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| config_io(parent, e))?;
    }
    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| config_io(path, e))?;
    info!("Wrote default configuration");
    Ok(())
}

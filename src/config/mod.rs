//! Configuration for the sticker renderer and document store.
//!
//! Settings come from a TOML or YAML file, then `STICKERS_*` environment
//! overrides, then validation.

mod loader;
mod path;
mod schema;

pub use loader::{
    apply_overrides, load_settings, load_settings_file, parse_settings, write_default_config,
    ConfigFormat, LoadedSettings, DEFAULT_CONFIG_TEMPLATE, ENV_STORAGE_DIR, ENV_TIMEZONE,
};
pub use path::{default_config_path, home_dir, resolve_path};
pub use schema::{Settings, StorageConfig, DEFAULT_STORAGE_DIR, DEFAULT_TIMEZONE};

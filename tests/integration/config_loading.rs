//! Integration tests for settings files.

use tempfile::TempDir;

use stickers::config::{load_settings, load_settings_file, Settings};
use stickers::error::StickerError;
use stickers::layout::OverflowPolicy;

use crate::common::fixtures::write_file;

#[test]
fn test_yaml_settings_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "stickers.yaml",
        "storage:\n  root: out\n  timezone: Asia/Manila\nlayout:\n  include_note: true\n  overflow: clip\n",
    );
    let settings = load_settings_file(&path).unwrap();
    assert_eq!(settings.storage.root, dir.path().join("out"));
    assert!(settings.layout.include_note);
    assert_eq!(settings.layout.overflow, OverflowPolicy::Clip);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_explicit_file_is_loaded_and_validated() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "stickers.toml", "[layout]\nfont_size = 0.0\n");
    let err = load_settings(Some(&path)).unwrap_err();
    assert!(matches!(err, StickerError::ConfigInvalid(_)));
}

#[test]
fn test_explicit_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_settings(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, StickerError::ConfigNotFound { .. }));
}

#[test]
fn test_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "bad.toml", "[storage\nroot = ");
    assert!(matches!(
        load_settings_file(&path),
        Err(StickerError::ConfigParse(_))
    ));
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "settings.ini", "[storage]");
    assert!(matches!(
        load_settings_file(&path),
        Err(StickerError::ConfigParse(_))
    ));
}

#[test]
fn test_settings_roundtrip_through_toml() {
    let settings = Settings::default();
    let text = toml::to_string_pretty(&settings).unwrap();
    let back: Settings = toml::from_str(&text).unwrap();
    assert_eq!(back, settings);
}

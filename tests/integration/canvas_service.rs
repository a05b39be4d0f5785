//! Integration tests for the canvas workflow.

use tempfile::TempDir;

use stickers::canvas::{CanvasRepository, MemoryCanvasRepository, StickerPress};
use stickers::error::StickerError;
use stickers::layout::{render, LayoutConfig};
use stickers::store::DocumentStore;

use crate::common::fixtures::{png_logo, sample_records};
use crate::common::pdf;

fn press(dir: &TempDir) -> StickerPress {
    StickerPress::new(
        LayoutConfig::default(),
        DocumentStore::new(dir.path(), chrono_tz::UTC),
    )
}

#[test]
fn test_preview_matches_direct_render() {
    let dir = TempDir::new().unwrap();
    let press = press(&dir);
    let repo = MemoryCanvasRepository::new();
    let records = sample_records(5);
    let id = repo.insert(records.clone());

    let preview = press.preview(&repo, id).unwrap();
    assert_eq!(preview, render(&records, &LayoutConfig::default()).unwrap());
    // Preview stores nothing
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    assert!(repo.find_canvas(id).unwrap().unwrap().document.is_none());
}

#[test]
fn test_publish_download_discard() {
    let dir = TempDir::new().unwrap();
    let press = press(&dir);
    let repo = MemoryCanvasRepository::new();
    let mut records = sample_records(2);
    records[0] = records[0].clone().with_logo(png_logo(50, 20, [0, 90, 0]));
    let id = repo.insert(records);

    let stored = press.publish(&repo, id).unwrap();
    let bytes = press.download(&repo, id).unwrap();
    pdf::assert_well_formed(&bytes);
    assert_eq!(bytes.len() as u64, stored.size_bytes);

    assert!(press.discard(&repo, id).unwrap());
    assert!(!dir.path().join(&stored.relative_path).exists());
    assert!(matches!(
        press.download(&repo, id),
        Err(StickerError::CanvasNotFound { .. })
    ));
}

#[test]
fn test_republish_replaces_reference() {
    let dir = TempDir::new().unwrap();
    let press = press(&dir);
    let repo = MemoryCanvasRepository::new();
    let id = repo.insert(sample_records(1));

    let first = press.publish(&repo, id).unwrap();
    let second = press.publish(&repo, id).unwrap();
    assert_ne!(first.document_id, second.document_id);
    let attached = repo.find_canvas(id).unwrap().unwrap().document.unwrap();
    assert_eq!(attached.document_id, second.document_id);
    assert!(!dir.path().join(&first.relative_path).exists());
    assert!(dir.path().join(&second.relative_path).is_file());
}

#[test]
fn test_canvas_over_capacity_stores_nothing() {
    let dir = TempDir::new().unwrap();
    let press = press(&dir);
    let repo = MemoryCanvasRepository::new();
    let id = repo.insert(sample_records(11));

    assert!(matches!(
        press.publish(&repo, id),
        Err(StickerError::TooManyStickers { .. })
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

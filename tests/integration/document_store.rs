//! Integration tests for the document store.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use stickers::config::StorageConfig;
use stickers::error::{ErrorKind, StickerError};
use stickers::layout::{render, LayoutConfig};
use stickers::store::DocumentStore;

use crate::common::fixtures::sample_records;

fn open(dir: &TempDir) -> DocumentStore {
    DocumentStore::open(&StorageConfig {
        root: dir.path().join("docs"),
        timezone: "Asia/Manila".to_string(),
    })
    .unwrap()
}

#[test]
fn test_rendered_page_roundtrip() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let bytes = render(&sample_records(4), &LayoutConfig::default()).unwrap();

    let doc = store.save(&bytes).unwrap();
    assert_eq!(doc.size_bytes, bytes.len() as u64);
    assert_eq!(store.load(&doc.relative_path).unwrap(), bytes);
}

#[test]
fn test_arbitrary_bytes_roundtrip() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    for payload in [&b"x"[..], &[0u8, 255, 10, 13][..], &vec![7u8; 64 * 1024][..]] {
        let doc = store.save(payload).unwrap();
        assert_eq!(store.load(&doc.relative_path).unwrap(), payload);
    }
}

#[test]
fn test_relative_path_layout() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let at = Utc
        .with_ymd_and_hms(2026, 3, 9, 1, 30, 0)
        .unwrap()
        .with_timezone(&store.timezone());
    let doc = store.save_at(b"%PDF-1.4", at).unwrap();

    let parts: Vec<_> = doc.relative_path.split('/').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "2026");
    assert_eq!(parts[1], "03");
    assert_eq!(parts[2], format!("{}.pdf", doc.document_id));
    assert_eq!(doc.document_id.get_version_num(), 4);
    assert_eq!(doc.created_at.offset().local_minus_utc(), 8 * 3600);
}

#[test]
fn test_delete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let doc = store.save(b"content").unwrap();

    assert!(store.delete(&doc.relative_path).unwrap());
    let err = store.load(&doc.relative_path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert!(!store.delete(&doc.relative_path).unwrap());
    assert!(!store.delete("1999/01/never-existed.pdf").unwrap());
}

#[test]
fn test_traversal_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    std::fs::write(dir.path().join("secret.txt"), b"host file").unwrap();

    for bad in ["../secret.txt", "../../etc/passwd", "/etc/passwd", "2026/../../secret.txt"] {
        let err = store.load(bad).unwrap_err();
        assert!(
            matches!(err, StickerError::InvalidPath { .. }),
            "{bad} gave {err:?}"
        );
        assert!(store.delete(bad).is_err());
    }
    assert!(dir.path().join("secret.txt").exists());
}

#[test]
fn test_concurrent_saves_share_month_directory() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(open(&dir));
    let at = Utc
        .with_ymd_and_hms(2026, 7, 1, 12, 0, 0)
        .unwrap()
        .with_timezone(&store.timezone());

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.save_at(&[i; 128], at).unwrap())
        })
        .collect();
    let docs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let paths: HashSet<_> = docs.iter().map(|d| d.relative_path.clone()).collect();
    assert_eq!(paths.len(), 8);
    for (i, doc) in docs.iter().enumerate() {
        assert!(doc.relative_path.starts_with("2026/07/"));
        assert_eq!(store.load(&doc.relative_path).unwrap(), vec![i as u8; 128]);
    }
    let entries = std::fs::read_dir(dir.path().join("docs/2026/07")).unwrap().count();
    assert_eq!(entries, 8);
}

#[test]
fn test_unknown_timezone_is_config_error() {
    let dir = TempDir::new().unwrap();
    let err = DocumentStore::open(&StorageConfig {
        root: dir.path().to_path_buf(),
        timezone: "Atlantis/Capital".to_string(),
    })
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

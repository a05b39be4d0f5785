//! Relative path validation for stored documents.
//!
//! Callers hand back paths they previously received from a save, but those
//! values travel through databases and HTTP requests, so every one is
//! checked before it touches the filesystem.

use std::path::{Component, Path, PathBuf};

use tracing::{trace, warn};

use crate::error::{Result, StickerError};

fn invalid(path: &str, reason: &'static str) -> StickerError {
    StickerError::InvalidPath {
        path: path.to_string(),
        reason,
    }
}

/// Lexically validate `relative` and return it as a path.
pub fn validate_relative(relative: &str) -> Result<PathBuf> {
    if relative.trim().is_empty() {
        return Err(invalid(relative, "path is empty"));
    }
    if relative.contains('\0') {
        return Err(invalid(relative, "path contains a NUL byte"));
    }
    if relative.contains('\\') {
        return Err(invalid(relative, "backslash separators are not accepted"));
    }

    let path = Path::new(relative);
    if path.is_absolute() {
        return Err(invalid(relative, "absolute paths are not accepted"));
    }

    let mut normal = 0usize;
    for component in path.components() {
        match component {
            Component::Normal(_) => normal += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(invalid(relative, "parent directory components are not accepted"));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid(relative, "absolute paths are not accepted"));
            }
        }
    }
    if normal == 0 {
        return Err(invalid(relative, "path names no file"));
    }

    Ok(path.to_path_buf())
}

/// Join `relative` onto `root`, refusing anything that escapes it.
///
/// Besides the lexical checks, an existing target is canonicalized so a
/// symlink inside the root cannot point outside of it.
pub fn resolve_within(root: &Path, relative: &str) -> Result<PathBuf> {
    let rel = validate_relative(relative)?;
    let full = root.join(rel);

    if let Ok(canonical) = full.canonicalize() {
        let canonical_root = root
            .canonicalize()
            .map_err(|e| StickerError::storage(root, e))?;
        if !canonical.starts_with(&canonical_root) {
            warn!(
                relative,
                resolved = %canonical.display(),
                "Rejected path resolving outside the storage root"
            );
            return Err(invalid(relative, "resolves outside the storage root"));
        }
    }

    trace!(relative, full = %full.display(), "Resolved document path");
    Ok(full)
}

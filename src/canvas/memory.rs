//! In-memory canvas repository for tests and one-shot CLI runs.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

use super::{CanvasRecord, CanvasRepository, DocumentRef};
use crate::error::{Result, StickerError};
use crate::record::StickerRecord;
use crate::store::StoredDocument;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    canvases: BTreeMap<i64, CanvasRecord>,
}

/// Canvas rows kept in a map behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryCanvasRepository {
    inner: Mutex<Inner>,
}

impl MemoryCanvasRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new canvas and return its id. Ids start at 1.
    pub fn insert(&self, stickers: Vec<StickerRecord>) -> i64 {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.canvases.insert(
            id,
            CanvasRecord {
                id,
                stickers,
                document: None,
            },
        );
        trace!(id, "Inserted canvas");
        id
    }

    pub fn len(&self) -> usize {
        self.lock().canvases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().canvases.is_empty()
    }
}

impl CanvasRepository for MemoryCanvasRepository {
    fn find_canvas(&self, id: i64) -> Result<Option<CanvasRecord>> {
        Ok(self.lock().canvases.get(&id).cloned())
    }

    fn attach_document(&self, id: i64, document: &StoredDocument) -> Result<()> {
        let mut inner = self.lock();
        let canvas = inner
            .canvases
            .get_mut(&id)
            .ok_or(StickerError::CanvasNotFound { id })?;
        canvas.document = Some(DocumentRef::from(document));
        Ok(())
    }

    fn remove_canvas(&self, id: i64) -> Result<bool> {
        Ok(self.lock().canvases.remove(&id).is_some())
    }
}

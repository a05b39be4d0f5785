//! Canvas workflow: a persisted batch of stickers and its rendered document.
//!
//! A canvas row lives in whatever database the host application uses; this
//! module reaches it only through [`CanvasRepository`]. [`StickerPress`]
//! strings together the layout engine, the [`DocumentStore`] and the
//! repository for the four things a client does with a canvas: preview it,
//! publish it, download the published file and discard it.

mod memory;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{Result, StickerError};
use crate::layout::{render, LayoutConfig};
use crate::record::StickerRecord;
use crate::store::{DocumentStore, StoredDocument};

pub use memory::MemoryCanvasRepository;

/// Identifier and location of a canvas's published document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub document_id: Uuid,
    pub relative_path: String,
}

impl From<&StoredDocument> for DocumentRef {
    fn from(doc: &StoredDocument) -> Self {
        Self {
            document_id: doc.document_id,
            relative_path: doc.relative_path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasRecord {
    pub id: i64,
    pub stickers: Vec<StickerRecord>,
    pub document: Option<DocumentRef>,
}

/// Persistence seam for canvas rows.
///
/// Implementations own their locking; every method takes `&self`.
pub trait CanvasRepository {
    /// Fetch a canvas together with its stickers.
    fn find_canvas(&self, id: i64) -> Result<Option<CanvasRecord>>;

    /// Record that `document` is the canvas's published file.
    fn attach_document(&self, id: i64, document: &StoredDocument) -> Result<()>;

    /// Delete the canvas row; returns whether it existed.
    fn remove_canvas(&self, id: i64) -> Result<bool>;
}

/// Renders, stores and retrieves canvas documents.
#[derive(Debug, Clone)]
pub struct StickerPress {
    layout: LayoutConfig,
    store: DocumentStore,
}

impl StickerPress {
    pub fn new(layout: LayoutConfig, store: DocumentStore) -> Self {
        Self { layout, store }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    fn canvas_with_stickers<R: CanvasRepository + ?Sized>(
        &self,
        repo: &R,
        id: i64,
    ) -> Result<CanvasRecord> {
        let canvas = repo
            .find_canvas(id)?
            .ok_or(StickerError::CanvasNotFound { id })?;
        if canvas.stickers.is_empty() {
            return Err(StickerError::EmptyCanvas { id });
        }
        Ok(canvas)
    }

    /// Render the canvas without storing anything.
    #[instrument(skip(self, repo))]
    pub fn preview<R: CanvasRepository + ?Sized>(&self, repo: &R, id: i64) -> Result<Vec<u8>> {
        let canvas = self.canvas_with_stickers(repo, id)?;
        render(&canvas.stickers, &self.layout)
    }

    /// Render the canvas, store the PDF and attach it to the canvas row.
    ///
    /// A canvas that was published before gets a new document and the
    /// superseded file is deleted once the new one is attached. If attaching
    /// fails, the file just written is removed again.
    #[instrument(skip(self, repo))]
    pub fn publish<R: CanvasRepository + ?Sized>(
        &self,
        repo: &R,
        id: i64,
    ) -> Result<StoredDocument> {
        let canvas = self.canvas_with_stickers(repo, id)?;
        let bytes = render(&canvas.stickers, &self.layout)?;
        let stored = self.store.save(&bytes)?;
        if let Err(e) = repo.attach_document(id, &stored) {
            self.remove_quietly(&stored.relative_path, "Could not remove unattached document");
            return Err(e);
        }
        if let Some(previous) = canvas.document {
            if previous.relative_path != stored.relative_path {
                self.remove_quietly(&previous.relative_path, "Could not remove superseded document");
            }
        }
        info!(
            stickers = canvas.stickers.len(),
            document_id = %stored.document_id,
            path = %stored.relative_path,
            "Published canvas"
        );
        Ok(stored)
    }

    fn remove_quietly(&self, relative: &str, context: &str) {
        match self.store.delete(relative) {
            Ok(true) => debug!(path = %relative, "Removed document"),
            Ok(false) => warn!(path = %relative, "{context}: already missing"),
            Err(e) => warn!(path = %relative, error = %e, "{context}"),
        }
    }

    /// Bytes of the canvas's published document.
    #[instrument(skip(self, repo))]
    pub fn download<R: CanvasRepository + ?Sized>(&self, repo: &R, id: i64) -> Result<Vec<u8>> {
        let canvas = repo
            .find_canvas(id)?
            .ok_or(StickerError::CanvasNotFound { id })?;
        let document = canvas.document.ok_or(StickerError::NoDocument { id })?;
        self.store.load(&document.relative_path)
    }

    /// Delete the stored document, then the canvas row.
    ///
    /// A storage failure leaves the row untouched. A document that is already
    /// gone does not block removing the row.
    #[instrument(skip(self, repo))]
    pub fn discard<R: CanvasRepository + ?Sized>(&self, repo: &R, id: i64) -> Result<bool> {
        let Some(canvas) = repo.find_canvas(id)? else {
            return Ok(false);
        };
        if let Some(document) = &canvas.document {
            if !self.store.delete(&document.relative_path)? {
                warn!(
                    path = %document.relative_path,
                    "Published document was already missing"
                );
            }
        }
        let removed = repo.remove_canvas(id)?;
        info!(removed, "Discarded canvas");
        Ok(removed)
    }
}

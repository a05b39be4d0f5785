//! PDF serialization for one sticker page.
//!
//! Output is PDF 1.4 with uncompressed content, the two standard Helvetica
//! faces and JPEG image XObjects. Nothing time- or randomness-dependent is
//! written (no `/ID`, no dates), so identical plans serialize to identical
//! bytes.

pub mod content;
pub mod writer;

use tracing::trace;

use crate::error::Result;
use crate::layout::PagePlan;

pub use content::{literal, num, page_content, ContentBuilder};
pub use writer::{build_document, image_name, to_bytes, PDF_VERSION};

/// Serialize `plan` as a complete single-page PDF document.
pub fn write_page(plan: &PagePlan) -> Result<Vec<u8>> {
    let doc = build_document(plan)?;
    trace!(objects = doc.objects.len(), "Assembled page document");
    to_bytes(doc)
}

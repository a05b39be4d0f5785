//! Sticker sheet layout engine.
//!
//! [`plan`] folds up to ten [`StickerRecord`]s into a display list on a fixed
//! A4 page; [`render`] serializes that list into PDF bytes. Neither performs
//! I/O and both are deterministic: the same records and configuration always
//! give byte-identical output.
//!
//! All input checks and logo decoding run before the first drawing operation
//! is produced, so a failing call never yields a partial page.

pub mod config;
pub mod fields;
pub mod geometry;
pub mod metrics;
pub mod wrap;

use std::collections::HashMap;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, trace};

use crate::error::{Result, StickerError};
use crate::image_ops::{prepare_logo, LogoImage};
use crate::record::StickerRecord;

pub use config::{LayoutConfig, OverflowPolicy};
pub use fields::{FieldSpec, FieldTable};
pub use geometry::{GridCell, PageGeometry, Point, Rect, MAX_STICKERS, PAGE_HEIGHT, PAGE_WIDTH};
pub use metrics::FontFace;

/// One drawing instruction in page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Grid separator.
    Line { from: Point, to: Point },
    /// A single run of text with its baseline starting at `origin`.
    Text {
        face: FontFace,
        size: f32,
        origin: Point,
        text: String,
    },
    /// Logo number `image` from [`PagePlan::images`] scaled into `rect`.
    Image { image: usize, rect: Rect },
    BeginClip { rect: Rect },
    EndClip,
}

/// Everything needed to serialize one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub width: f32,
    pub height: f32,
    pub grid_gray: f32,
    pub grid_line_width: f32,
    pub ops: Vec<DrawOp>,
    /// Distinct logos, in first-use order.
    pub images: Vec<LogoImage>,
}

impl PagePlan {
    /// Text runs with their origins, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = (Point, &str)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { origin, text, .. } => Some((*origin, text.as_str())),
            _ => None,
        })
    }

    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }
}

/// Render `records` into a single-page PDF.
///
/// # Errors
///
/// [`StickerError::TooManyStickers`] for more than [`MAX_STICKERS`] records,
/// [`StickerError::InvalidField`] for untypesettable values and
/// [`StickerError::ImageDecode`] for an unreadable logo.
#[instrument(skip_all, fields(count = records.len()))]
pub fn render(records: &[StickerRecord], config: &LayoutConfig) -> Result<Vec<u8>> {
    let plan = plan(records, config)?;
    let bytes = crate::pdf::write_page(&plan)?;
    debug!(bytes = bytes.len(), ops = plan.ops.len(), "Rendered sticker page");
    Ok(bytes)
}

/// Lay out `records` without serializing.
#[instrument(skip_all, fields(count = records.len()))]
pub fn plan(records: &[StickerRecord], config: &LayoutConfig) -> Result<PagePlan> {
    if records.len() > MAX_STICKERS {
        return Err(StickerError::TooManyStickers {
            count: records.len(),
            max: MAX_STICKERS,
        });
    }
    config.validate()?;
    for (index, record) in records.iter().enumerate() {
        record.validate(index)?;
    }

    let (images, logo_slots) = collect_logos(records, config)?;

    let geometry = PageGeometry::from_config(config);
    let table = FieldTable::from_config(config);
    let mut ops = Vec::new();

    // Separators cover the whole grid, including empty cells.
    for (from, to) in geometry.grid_lines() {
        ops.push(DrawOp::Line { from, to });
    }

    for (index, record) in records.iter().enumerate() {
        let Some(rect) = geometry.index_rect(index) else {
            continue;
        };
        trace!(index, x = rect.x, y = rect.y, "Placing sticker");
        layout_cell(&mut ops, record, rect, logo_slots[index], &table, config);
    }

    Ok(PagePlan {
        width: PAGE_WIDTH,
        height: PAGE_HEIGHT,
        grid_gray: config.grid_gray,
        grid_line_width: config.grid_line_width,
        ops,
        images,
    })
}

/// Decode every logo up front, embedding identical bytes once.
fn collect_logos(
    records: &[StickerRecord],
    config: &LayoutConfig,
) -> Result<(Vec<LogoImage>, Vec<Option<usize>>)> {
    let mut images = Vec::new();
    let mut seen: HashMap<[u8; 32], usize> = HashMap::new();
    let mut slots = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let Some(bytes) = record.logo_bytes() else {
            slots.push(None);
            continue;
        };
        let digest: [u8; 32] = Sha256::digest(bytes).into();
        let slot = if let Some(&slot) = seen.get(&digest) {
            slot
        } else {
            let logo = prepare_logo(bytes, index, config.logo_width, config.logo_height)?;
            images.push(logo);
            seen.insert(digest, images.len() - 1);
            images.len() - 1
        };
        slots.push(Some(slot));
    }
    Ok((images, slots))
}

fn layout_cell(
    ops: &mut Vec<DrawOp>,
    record: &StickerRecord,
    cell: Rect,
    logo: Option<usize>,
    table: &FieldTable,
    config: &LayoutConfig,
) {
    let clip = config.overflow == OverflowPolicy::Clip;
    if clip {
        ops.push(DrawOp::BeginClip { rect: cell });
    }

    let text_x = cell.x + config.left_padding;
    let mut baseline = match logo {
        Some(image) => {
            let rect = Rect {
                x: text_x,
                y: cell.top() - config.logo_top_inset - config.logo_height,
                width: config.logo_width,
                height: config.logo_height,
            };
            ops.push(DrawOp::Image { image, rect });
            rect.y - config.logo_text_gap
        }
        None => cell.top() - config.text_top_inset,
    };

    let size = config.font_size;
    let usable = cell.width - 2.0 * config.left_padding;

    for (spec, field) in table.specs().iter().zip(table.fields_for(record)) {
        let label = format!("{}:", field.label);
        let label_width = metrics::string_width(FontFace::Bold, size, &label);
        ops.push(DrawOp::Text {
            face: FontFace::Bold,
            size,
            origin: Point::new(text_x, baseline),
            text: label,
        });

        let lines = if spec.wrap {
            let offset = label_width + config.label_gap;
            wrap::wrap_value(&field.value, usable - offset, usable, |s| {
                metrics::string_width(FontFace::Regular, size, s)
            })
        } else {
            vec![wrap::single_line(&field.value)]
        };

        for (n, line) in lines.into_iter().enumerate() {
            let x = if n == 0 {
                text_x + label_width + config.label_gap
            } else {
                baseline -= config.line_height;
                text_x
            };
            if !line.is_empty() {
                ops.push(DrawOp::Text {
                    face: FontFace::Regular,
                    size,
                    origin: Point::new(x, baseline),
                    text: line,
                });
            }
        }
        baseline -= config.line_height;
    }

    if clip {
        ops.push(DrawOp::EndClip);
    }
}

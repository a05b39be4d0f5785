//! Page and grid geometry.
//!
//! Coordinates are PDF user space: origin at the bottom-left corner of the
//! page, y growing upward, one unit per point. Grid rows are numbered from
//! the top of the page, so row `GRID_ROWS - 1` is the bottom row.

use serde::Serialize;

use super::config::LayoutConfig;

/// ISO A4 width in points.
pub const PAGE_WIDTH: f32 = 595.2756;
/// ISO A4 height in points.
pub const PAGE_HEIGHT: f32 = 841.8898;

pub const GRID_COLUMNS: usize = 2;
pub const GRID_ROWS: usize = 5;
/// Cells per page.
pub const MAX_STICKERS: usize = GRID_COLUMNS * GRID_ROWS;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Half-open containment: left/bottom edges inclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.top()
    }
}

/// Grid position; `row` 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub col: usize,
    pub row: usize,
}

/// Derived grid measurements for one layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    margin: f32,
    cell_width: f32,
    cell_height: f32,
}

impl PageGeometry {
    pub fn new(margin: f32) -> Self {
        let usable_width = PAGE_WIDTH - 2.0 * margin;
        let usable_height = PAGE_HEIGHT - 2.0 * margin;
        Self {
            margin,
            cell_width: usable_width / GRID_COLUMNS as f32,
            cell_height: usable_height / GRID_ROWS as f32,
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.margin)
    }

    pub const fn cell_width(&self) -> f32 {
        self.cell_width
    }

    pub const fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Cell holding record `index`: `col = i mod 2`, `row = 4 - i div 2`.
    ///
    /// Record 0 is bottom-left, record 1 bottom-right, record 2 one row up.
    pub const fn cell_for_index(index: usize) -> Option<GridCell> {
        if index >= MAX_STICKERS {
            return None;
        }
        Some(GridCell {
            col: index % GRID_COLUMNS,
            row: GRID_ROWS - 1 - index / GRID_COLUMNS,
        })
    }

    pub fn cell_rect(&self, cell: GridCell) -> Rect {
        let rows_from_bottom = GRID_ROWS - 1 - cell.row;
        Rect {
            x: self.margin + cell.col as f32 * self.cell_width,
            y: self.margin + rows_from_bottom as f32 * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    pub fn index_rect(&self, index: usize) -> Option<Rect> {
        Self::cell_for_index(index).map(|cell| self.cell_rect(cell))
    }

    /// Record index whose cell contains `p`, if any.
    pub fn cell_at(&self, p: Point) -> Option<usize> {
        let dx = p.x - self.margin;
        let dy = p.y - self.margin;
        if dx < 0.0 || dy < 0.0 {
            return None;
        }
        let col = (dx / self.cell_width).floor() as usize;
        let rows_from_bottom = (dy / self.cell_height).floor() as usize;
        if col >= GRID_COLUMNS || rows_from_bottom >= GRID_ROWS {
            return None;
        }
        Some(rows_from_bottom * GRID_COLUMNS + col)
    }

    /// Separator segments covering the whole grid, verticals first.
    pub fn grid_lines(&self) -> Vec<(Point, Point)> {
        let left = self.margin;
        let bottom = self.margin;
        let right = self.margin + GRID_COLUMNS as f32 * self.cell_width;
        let top = self.margin + GRID_ROWS as f32 * self.cell_height;

        let verticals = (0..=GRID_COLUMNS).map(|col| {
            let x = left + col as f32 * self.cell_width;
            (Point::new(x, bottom), Point::new(x, top))
        });
        let horizontals = (0..=GRID_ROWS).map(|row| {
            let y = bottom + row as f32 * self.cell_height;
            (Point::new(left, y), Point::new(right, y))
        });
        verticals.chain(horizontals).collect()
    }
}

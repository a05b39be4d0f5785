//! Layout constants passed explicitly into the renderer.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StickerError};

use super::geometry::{PAGE_HEIGHT, PAGE_WIDTH};

/// What to do with text that runs past the bottom of its cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Draw everything; long text may cross the cell border.
    #[default]
    Allow,
    /// Crop ink at the cell rectangle. Positions are unchanged.
    Clip,
}

/// Typography and spacing of the sticker sheet, in PDF points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Inset of the grid from every page edge.
    pub margin: f32,
    pub font_size: f32,
    /// Baseline advance per line.
    pub line_height: f32,
    /// Horizontal padding inside each cell, applied on both sides.
    pub left_padding: f32,
    /// Space between `LABEL:` and the first value word.
    pub label_gap: f32,
    /// Distance from the cell top to the first baseline when there is no logo.
    pub text_top_inset: f32,
    pub logo_width: f32,
    pub logo_height: f32,
    pub logo_top_inset: f32,
    /// Distance from the logo's bottom edge to the first baseline.
    pub logo_text_gap: f32,
    /// Grid stroke gray level, 0 = black, 1 = white.
    pub grid_gray: f32,
    pub grid_line_width: f32,
    /// Append the NOTE field after QUANTITY.
    pub include_note: bool,
    pub overflow: OverflowPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 20.0,
            font_size: 10.0,
            line_height: 14.0,
            left_padding: 12.0,
            label_gap: 4.0,
            text_top_inset: 14.0,
            logo_width: 120.0,
            logo_height: 50.0,
            logo_top_inset: 5.0,
            logo_text_gap: 16.0,
            grid_gray: 0.827,
            grid_line_width: 0.5,
            include_note: false,
            overflow: OverflowPolicy::Allow,
        }
    }
}

impl LayoutConfig {
    /// Check that every dimension is usable on an A4 page.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("font_size", self.font_size),
            ("line_height", self.line_height),
            ("logo_width", self.logo_width),
            ("logo_height", self.logo_height),
            ("grid_line_width", self.grid_line_width),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(StickerError::ConfigInvalid(format!(
                    "layout.{name} must be greater than 0, got {value}"
                )));
            }
        }

        let non_negative = [
            ("margin", self.margin),
            ("left_padding", self.left_padding),
            ("label_gap", self.label_gap),
            ("text_top_inset", self.text_top_inset),
            ("logo_top_inset", self.logo_top_inset),
            ("logo_text_gap", self.logo_text_gap),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(StickerError::ConfigInvalid(format!(
                    "layout.{name} must not be negative, got {value}"
                )));
            }
        }

        if self.margin * 2.0 >= PAGE_WIDTH.min(PAGE_HEIGHT) {
            return Err(StickerError::ConfigInvalid(format!(
                "layout.margin {} leaves no room for the grid",
                self.margin
            )));
        }

        if !(0.0..=1.0).contains(&self.grid_gray) {
            return Err(StickerError::ConfigInvalid(format!(
                "layout.grid_gray must be between 0 and 1, got {}",
                self.grid_gray
            )));
        }

        Ok(())
    }
}

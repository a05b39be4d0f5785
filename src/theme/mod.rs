//! Colors for human-mode output.

use console::Style;

/// Styles shared by every human-mode message.
pub struct StickerTheme {
    pub accent: Style,
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub muted: Style,
    pub label: Style,
    pub value: Style,
    pub path: Style,
}

impl Default for StickerTheme {
    fn default() -> Self {
        Self {
            accent: Style::new().color256(33).bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warning: Style::new().yellow().bold(),
            muted: Style::new().color256(245),
            label: Style::new().dim(),
            value: Style::new().bold(),
            path: Style::new().cyan(),
        }
    }
}

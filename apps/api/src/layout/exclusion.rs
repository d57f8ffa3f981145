//! The rectangle reserved around the centered title.

use crate::layout::frame::{CanvasFrame, LayoutConfig, TitleSpec};
use crate::layout::geometry::Rect;

/// Title glyph advance as a fraction of the title font size (bold, slightly tighter than segments).
const TITLE_CHAR_WIDTH_EM: f64 = 0.9;
const TITLE_LINE_HEIGHT_EM: f64 = 1.2;

/// Computes the exclusion rect: the title's estimated box, centered on the canvas,
/// grown by `title_margin_x` on the left/right and `title_margin_y` on the top/bottom.
///
/// Width uses the longest line by character count; height is `lines × 1.2em`.
/// Must be recomputed whenever the title text, its font size or the canvas changes.
pub fn exclusion_rect(title: &TitleSpec, canvas: &CanvasFrame, config: &LayoutConfig) -> Rect {
    let font_size = title.font_size as f64;
    let width = title.longest_line_chars() as f64 * font_size * TITLE_CHAR_WIDTH_EM;
    let height = title.lines.len() as f64 * font_size * TITLE_LINE_HEIGHT_EM;
    let (cx, cy) = canvas.center();

    Rect {
        left: cx - width / 2.0 - config.title_margin_x,
        right: cx + width / 2.0 + config.title_margin_x,
        top: cy - height / 2.0 - config.title_margin_y,
        bottom: cy + height / 2.0 + config.title_margin_y,
    }
}

//! Draw list for the renderer: where each glyph run, title line and highlight band goes.
//!
//! Geometry only. Colors, font family and rasterization belong to the client; it must
//! issue one draw call per op, in order, using the anchors as given.

use serde::{Deserialize, Serialize};

use crate::layout::frame::{CanvasFrame, TitleSpec};
use crate::layout::geometry::{Orientation, Rect};
use crate::layout::search::PlacedText;

/// Distance between stacked glyphs of a vertical segment, in em.
const VERTICAL_ADVANCE_EM: f64 = 1.1;
const TITLE_LINE_HEIGHT_EM: f64 = 1.2;
/// Highlight band width per title character, in em.
const HIGHLIGHT_CHAR_WIDTH_EM: f64 = 0.85;
const HIGHLIGHT_HEIGHT_EM: f64 = 0.5;
/// Highlight sits slightly below the line center, toward the baseline.
const HIGHLIGHT_DROP_EM: f64 = 0.2;
/// Horizontal overhang of the highlight band past each end of the line.
const HIGHLIGHT_OVERHANG: f64 = 50.0;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Background image as uploaded, plus the crop editor's zoom and pan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImage {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    /// Pan offset of the image center from the canvas center.
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
}

fn default_zoom() -> f64 {
    1.0
}

/// One draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Background image scaled uniformly and centered on `(center_x, center_y)`.
    Background {
        center_x: f64,
        center_y: f64,
        scale: f64,
    },
    /// Scattered segment text; `(x, y)` is the top-left anchor.
    Segment {
        text: String,
        font_size: u32,
        x: f64,
        y: f64,
    },
    TitleHighlight { rect: Rect },
    /// Bold title line centered on `(center_x, center_y)`.
    TitleLine {
        text: String,
        font_size: u32,
        center_x: f64,
        center_y: f64,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// Builds the ordered draw list: background, segments, then each title line's
/// highlight (if enabled) followed by the line itself.
pub fn compose(
    canvas: &CanvasFrame,
    title: &TitleSpec,
    placements: &[PlacedText],
    background: Option<&BackgroundImage>,
    highlight: bool,
) -> Vec<DrawOp> {
    let mut ops = Vec::new();

    if let Some(op) = background.and_then(|bg| background_op(canvas, bg)) {
        ops.push(op);
    }

    for placed in placements {
        match placed.orientation {
            Orientation::Horizontal => ops.push(DrawOp::Segment {
                text: placed.text.clone(),
                font_size: placed.font_size,
                x: placed.x,
                y: placed.y,
            }),
            Orientation::Vertical => {
                let advance = placed.font_size as f64 * VERTICAL_ADVANCE_EM;
                for (i, ch) in placed.text.chars().enumerate() {
                    ops.push(DrawOp::Segment {
                        text: ch.to_string(),
                        font_size: placed.font_size,
                        x: placed.x,
                        y: placed.y + i as f64 * advance,
                    });
                }
            }
        }
    }

    ops.extend(title_ops(canvas, title, highlight));
    ops
}

/// Cover-fit: the smallest uniform scale that fills the canvas, times the user's zoom.
/// Images with a zero dimension are skipped.
fn background_op(canvas: &CanvasFrame, bg: &BackgroundImage) -> Option<DrawOp> {
    if bg.width == 0 || bg.height == 0 {
        return None;
    }
    let scale_x = canvas.width as f64 / bg.width as f64;
    let scale_y = canvas.height as f64 / bg.height as f64;
    let (cx, cy) = canvas.center();

    Some(DrawOp::Background {
        center_x: cx + bg.offset_x,
        center_y: cy + bg.offset_y,
        scale: scale_x.max(scale_y) * bg.zoom,
    })
}

fn title_ops(canvas: &CanvasFrame, title: &TitleSpec, highlight: bool) -> Vec<DrawOp> {
    let font_size = title.font_size as f64;
    let line_height = font_size * TITLE_LINE_HEIGHT_EM;
    let total_height = title.lines.len() as f64 * line_height;
    let (cx, cy) = canvas.center();
    let first_center = cy - total_height / 2.0 + line_height / 2.0;

    let mut ops = Vec::with_capacity(title.lines.len() * 2);
    for (i, line) in title.lines.iter().enumerate() {
        let line_y = first_center + i as f64 * line_height;

        if highlight {
            let line_width = line.chars().count() as f64 * font_size * HIGHLIGHT_CHAR_WIDTH_EM;
            let band_height = font_size * HIGHLIGHT_HEIGHT_EM;
            ops.push(DrawOp::TitleHighlight {
                rect: Rect::from_origin(
                    cx - line_width / 2.0 - HIGHLIGHT_OVERHANG,
                    line_y - band_height / 2.0 + font_size * HIGHLIGHT_DROP_EM,
                    line_width + HIGHLIGHT_OVERHANG * 2.0,
                    band_height,
                ),
            });
        }

        ops.push(DrawOp::TitleLine {
            text: line.clone(),
            font_size: title.font_size,
            center_x: cx,
            center_y: line_y,
        });
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> CanvasFrame {
        CanvasFrame::new(1280, 720)
    }

    #[test]
    fn test_vertical_segment_emits_one_op_per_char() {
        let placed = vec![PlacedText {
            text: "映画".to_string(),
            font_size: 40,
            x: 50.0,
            y: 100.0,
            orientation: Orientation::Vertical,
        }];
        let title = TitleSpec {
            lines: vec![],
            font_size: 100,
        };
        let ops = compose(&canvas(), &title, &placed, None, false);

        assert_eq!(ops.len(), 2);
        let DrawOp::Segment { text, x, y, .. } = &ops[1] else {
            panic!("expected segment op, got {:?}", ops[1]);
        };
        assert_eq!(text, "画");
        assert_eq!(*x, 50.0);
        assert!((y - 144.0).abs() < 1e-9, "second glyph 1.1em below first, got {y}");
    }

    #[test]
    fn test_horizontal_segment_is_single_op() {
        let placed = vec![PlacedText {
            text: "Design".to_string(),
            font_size: 30,
            x: 10.0,
            y: 20.0,
            orientation: Orientation::Horizontal,
        }];
        let title = TitleSpec {
            lines: vec![],
            font_size: 100,
        };
        let ops = compose(&canvas(), &title, &placed, None, true);
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], DrawOp::Segment { text, .. } if text == "Design"));
    }

    #[test]
    fn test_single_title_line_centered_with_highlight() {
        let title = TitleSpec {
            lines: vec!["TEST".to_string()],
            font_size: 100,
        };
        let ops = compose(&canvas(), &title, &[], None, true);
        assert_eq!(ops.len(), 2);

        let DrawOp::TitleHighlight { rect } = &ops[0] else {
            panic!("expected highlight first, got {:?}", ops[0]);
        };
        // line width 4 × 100 × 0.85 = 340, band 50 tall, dropped 20 below center
        assert!((rect.width() - 440.0).abs() < 1e-9);
        assert!((rect.left - (640.0 - 170.0 - 50.0)).abs() < 1e-9);
        assert!((rect.height() - 50.0).abs() < 1e-9);
        assert!((rect.top - (360.0 - 25.0 + 20.0)).abs() < 1e-9);

        assert_eq!(
            ops[1],
            DrawOp::TitleLine {
                text: "TEST".to_string(),
                font_size: 100,
                center_x: 640.0,
                center_y: 360.0,
            }
        );
    }

    #[test]
    fn test_multiline_title_stacks_around_center() {
        let title = TitleSpec::from_text("one\ntwo", 100);
        let ops = compose(&canvas(), &title, &[], None, false);
        let centers: Vec<f64> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::TitleLine { center_y, .. } => Some(*center_y),
                _ => None,
            })
            .collect();
        assert_eq!(centers.len(), 2);
        assert!((centers[0] - 300.0).abs() < 1e-9);
        assert!((centers[1] - 420.0).abs() < 1e-9);
    }

    #[test]
    fn test_background_cover_fit_with_zoom_and_pan() {
        let bg = BackgroundImage {
            width: 640,
            height: 640,
            zoom: 1.5,
            offset_x: 10.0,
            offset_y: -20.0,
        };
        let title = TitleSpec {
            lines: vec![],
            font_size: 100,
        };
        let ops = compose(&canvas(), &title, &[], Some(&bg), false);
        // cover scale = max(1280/640, 720/640) = 2.0
        assert_eq!(
            ops[0],
            DrawOp::Background {
                center_x: 650.0,
                center_y: 340.0,
                scale: 3.0,
            }
        );
    }

    #[test]
    fn test_empty_background_skipped() {
        let bg = BackgroundImage {
            width: 0,
            height: 100,
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        let title = TitleSpec {
            lines: vec![],
            font_size: 100,
        };
        assert!(compose(&canvas(), &title, &[], Some(&bg), false).is_empty());
    }
}

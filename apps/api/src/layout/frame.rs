//! Inputs to a layout call: canvas size, title geometry, font range and engine tuning.

use serde::{Deserialize, Serialize};

use crate::layout::LayoutError;

// ────────────────────────────────────────────────────────────────────────────
// Canvas
// ────────────────────────────────────────────────────────────────────────────

/// Pixel dimensions of the thumbnail being composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasFrame {
    pub width: u32,
    pub height: u32,
}

impl CanvasFrame {
    pub fn new(width: u32, height: u32) -> Self {
        CanvasFrame { width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.width == 0 || self.height == 0 {
            return Err(LayoutError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Export presets offered by the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:5")]
    Portrait,
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
}

impl AspectRatio {
    pub fn frame(self) -> CanvasFrame {
        match self {
            AspectRatio::Square => CanvasFrame::new(1080, 1080),
            AspectRatio::Portrait => CanvasFrame::new(1080, 1350),
            AspectRatio::Widescreen => CanvasFrame::new(1280, 720),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Title and fonts
// ────────────────────────────────────────────────────────────────────────────

/// The centered title. Only its geometry matters to the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSpec {
    pub lines: Vec<String>,
    pub font_size: u32,
}

impl TitleSpec {
    /// Splits a multi-line title on `\n`, keeping empty lines (they still take vertical space).
    pub fn from_text(text: &str, font_size: u32) -> Self {
        TitleSpec {
            lines: text.split('\n').map(str::to_string).collect(),
            font_size,
        }
    }

    /// Character count of the longest line.
    pub fn longest_line_chars(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Inclusive range segment font sizes are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizeRange {
    pub min: u32,
    pub max: u32,
}

impl FontSizeRange {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.min > self.max {
            return Err(LayoutError::InvalidFontRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for FontSizeRange {
    fn default() -> Self {
        FontSizeRange { min: 30, max: 66 }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine tuning
// ────────────────────────────────────────────────────────────────────────────

/// Tunable constants of the scatter engine. All lengths are canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal margin added on each side of the title box.
    pub title_margin_x: f64,
    /// Vertical margin added above and below the title box.
    pub title_margin_y: f64,
    /// Gap kept between every zone band and the canvas edge.
    pub padding: f64,
    /// Depth of the top/bottom bands as a fraction of canvas height.
    pub frame_ratio: f64,
    /// Left/right bands are this fraction of the top/bottom band depth.
    pub side_band_ratio: f64,
    /// Resample budget per segment.
    pub max_attempts: u32,
    pub grid_rows: u32,
    pub grid_cols: u32,
    /// Restrict sampling to the least-populated edge cell of the zone.
    pub grid_bias: bool,
    /// Probability that a left/right segment is laid out horizontally instead of stacked.
    pub side_horizontal_chance: f64,
    /// When every sample hit the title, accept the last one instead of sweeping the band.
    pub allow_title_overlap_on_exhaustion: bool,
}

impl LayoutConfig {
    pub fn frame_thickness(&self, canvas: &CanvasFrame) -> f64 {
        canvas.height as f64 * self.frame_ratio
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(LayoutError::InvalidGrid {
                rows: self.grid_rows,
                cols: self.grid_cols,
            });
        }
        if self.max_attempts == 0 {
            return Err(LayoutError::InvalidAttemptBudget);
        }
        if !(0.0..=1.0).contains(&self.side_horizontal_chance) {
            return Err(LayoutError::InvalidSideChance);
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            title_margin_x: 100.0,
            title_margin_y: 80.0,
            padding: 30.0,
            frame_ratio: 0.35,
            side_band_ratio: 0.6,
            max_attempts: 150,
            grid_rows: 3,
            grid_cols: 4,
            grid_bias: true,
            side_horizontal_chance: 0.0,
            allow_title_overlap_on_exhaustion: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_width_canvas_rejected() {
        let err = CanvasFrame::new(0, 720).validate().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidDimensions {
                width: 0,
                height: 720
            }
        ));
    }

    #[test]
    fn test_inverted_font_range_rejected() {
        let range = FontSizeRange { min: 50, max: 10 };
        assert!(matches!(
            range.validate(),
            Err(LayoutError::InvalidFontRange { min: 50, max: 10 })
        ));
        assert!(FontSizeRange { min: 40, max: 40 }.validate().is_ok());
    }

    #[test]
    fn test_aspect_ratio_presets() {
        assert_eq!(AspectRatio::Square.frame(), CanvasFrame::new(1080, 1080));
        assert_eq!(AspectRatio::Portrait.frame(), CanvasFrame::new(1080, 1350));
        assert_eq!(AspectRatio::default().frame(), CanvasFrame::new(1280, 720));
    }

    #[test]
    fn test_aspect_ratio_serde_uses_ratio_labels() {
        let parsed: AspectRatio = serde_json::from_str("\"4:5\"").unwrap();
        assert_eq!(parsed, AspectRatio::Portrait);
        assert_eq!(serde_json::to_string(&AspectRatio::Square).unwrap(), "\"1:1\"");
    }

    #[test]
    fn test_title_from_text_keeps_lines() {
        let title = TitleSpec::from_text("#映画鑑賞記録\n2025", 100);
        assert_eq!(title.lines.len(), 2);
        assert_eq!(title.longest_line_chars(), 7);
    }

    #[test]
    fn test_config_rejects_empty_grid_and_budget() {
        let mut config = LayoutConfig {
            grid_cols: 0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidGrid { rows: 3, cols: 0 })
        ));

        config.grid_cols = 4;
        config.max_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidAttemptBudget)
        ));

        config.max_attempts = 10;
        config.side_horizontal_chance = 1.5;
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidSideChance)
        ));
    }
}

//! Rectangles, text footprints and overlap tests.
#![allow(dead_code)]
//!
//! Text footprints are estimated from character count alone: every glyph is treated as a
//! `0.8em × 1.2em` cell, whatever the script or font. This is an intentional approximation:
//! real glyph metrics differ (CJK glyphs are wider, Latin lowercase narrower), but the
//! heuristic keeps layouts reproducible for a given seed and needs no font files.

use serde::{Deserialize, Serialize};

/// Horizontal advance of one character, as a fraction of the font size.
pub const CHAR_WIDTH_EM: f64 = 0.8;
/// Line height of one character, as a fraction of the font size.
pub const CHAR_HEIGHT_EM: f64 = 1.2;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// How a segment's characters are laid out on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// A single line of text, read left to right.
    Horizontal,
    /// One character per line, stacked downwards from the anchor.
    Vertical,
}

/// Axis-aligned rectangle in canvas pixels. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn from_origin(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            left: x,
            right: x + width,
            top: y,
            bottom: y + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Closed-interval intersection: rectangles that merely touch count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Bounding box estimation
// ────────────────────────────────────────────────────────────────────────────

/// Estimates the footprint of `text` anchored at `(x, y)`.
///
/// Horizontal: `chars × 0.8em` wide, `1.2em` tall.
/// Vertical: `0.8em` wide, `chars × 1.2em` tall.
/// Characters are counted as Unicode scalar values, so `"映画"` is two glyphs.
pub fn estimate_box(x: f64, y: f64, text: &str, font_size: f64, orientation: Orientation) -> Rect {
    let chars = text.chars().count() as f64;
    let char_w = font_size * CHAR_WIDTH_EM;
    let char_h = font_size * CHAR_HEIGHT_EM;

    match orientation {
        Orientation::Horizontal => Rect::from_origin(x, y, chars * char_w, char_h),
        Orientation::Vertical => Rect::from_origin(x, y, char_w, chars * char_h),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Overlap evaluation
// ────────────────────────────────────────────────────────────────────────────

pub fn overlaps_title(candidate: &Rect, exclusion: &Rect) -> bool {
    candidate.overlaps(exclusion)
}

/// Number of already-placed boxes the candidate intersects.
pub fn count_overlaps(candidate: &Rect, placed: &[Rect]) -> usize {
    placed.iter().filter(|b| candidate.overlaps(b)).count()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

//! Random candidate anchors inside a zone band.

use rand::Rng;

use crate::layout::frame::CanvasFrame;
use crate::layout::geometry::Rect;
use crate::layout::zones::Band;

/// Draws anchors for one segment. When a target cell is given, the band is intersected
/// with the cell on both axes so every anchor is counted in the cell it was aimed at.
#[derive(Debug, Clone, Copy)]
pub struct CandidateSampler {
    x: (f64, f64),
    y: (f64, f64),
    canvas_w: f64,
    canvas_h: f64,
}

impl CandidateSampler {
    pub fn new(band: Band, target_cell: Option<Rect>, canvas: &CanvasFrame) -> Self {
        let (mut x, mut y) = (band.x, band.y);

        if let Some(cell) = target_cell {
            x = narrow(x, (cell.left, cell.right));
            y = narrow(y, (cell.top, cell.bottom));
        }

        CandidateSampler {
            x,
            y,
            canvas_w: canvas.width as f64,
            canvas_h: canvas.height as f64,
        }
    }

    /// One uniform draw. Anchors are clamped onto the canvas so degenerate bands
    /// (padding wider than a tiny canvas) cannot push them outside it.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let x = draw(rng, self.x).clamp(0.0, self.canvas_w);
        let y = draw(rng, self.y).clamp(0.0, self.canvas_h);
        (x, y)
    }

    /// `steps × steps` anchors at the centers of an even subdivision of the band, row-major.
    /// The upper bounds are never hit, matching the half-open ranges `sample` draws from.
    pub fn lattice(&self, steps: u32) -> Vec<(f64, f64)> {
        let steps = steps.max(1);
        let at = |(lo, hi): (f64, f64), i: u32, max: f64| {
            let t = (i as f64 + 0.5) / steps as f64;
            (lo + (hi - lo).max(0.0) * t).clamp(0.0, max)
        };

        (0..steps)
            .flat_map(|j| (0..steps).map(move |i| (i, j)))
            .map(|(i, j)| (at(self.x, i, self.canvas_w), at(self.y, j, self.canvas_h)))
            .collect()
    }
}

/// Intersection of two ranges, or the original range when they are disjoint.
///
/// The upper bound of a cell is exclusive so a sampled anchor stays inside it.
fn narrow(range: (f64, f64), cell: (f64, f64)) -> (f64, f64) {
    let lo = range.0.max(cell.0);
    let hi = range.1.min(cell.1);
    if lo < hi {
        (lo, hi)
    } else {
        range
    }
}

/// Uniform in `[lo, hi)`; collapses to `lo` for empty or inverted ranges.
fn draw<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

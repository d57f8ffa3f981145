//! Edge zones: which band of the canvas each segment goes to, and how it is oriented.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::layout::frame::{CanvasFrame, LayoutConfig};
use crate::layout::geometry::Orientation;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// One of the four bands running along the canvas edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Top,
    Bottom,
    Left,
    Right,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Top, Zone::Bottom, Zone::Left, Zone::Right];

    /// Round-robin slot → zone mapping (`0:Top, 1:Bottom, 2:Left, 3:Right`).
    pub fn from_slot(slot: usize) -> Zone {
        Zone::ALL[slot % 4]
    }

    pub fn is_side(self) -> bool {
        matches!(self, Zone::Left | Zone::Right)
    }
}

/// How segments are distributed over the four zones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneStrategy {
    /// Input order: first ⌈30%⌉ top, next ⌈30%⌉ bottom, next ⌈20%⌉ left, rest right.
    Proportional,
    /// Random permutation of indices; a segment's zone is its permuted position mod 4.
    #[default]
    ShuffledRoundRobin,
    /// Consecutive blocks of ⌈N/4⌉ segments per zone, in input order.
    EvenBlocks,
}

/// Closed sampling ranges for a zone band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

// ────────────────────────────────────────────────────────────────────────────
// Zone assignment
// ────────────────────────────────────────────────────────────────────────────

/// Assigns a zone to each of `count` segments, indexed by original segment position.
///
/// Only `ShuffledRoundRobin` draws from `rng` (one shuffle of the index list).
pub fn assign_zones<R: Rng + ?Sized>(count: usize, strategy: ZoneStrategy, rng: &mut R) -> Vec<Zone> {
    match strategy {
        ZoneStrategy::Proportional => proportional_split(count),
        ZoneStrategy::ShuffledRoundRobin => {
            let mut order: Vec<usize> = (0..count).collect();
            order.shuffle(rng);

            let mut zones = vec![Zone::Top; count];
            for (position, &segment) in order.iter().enumerate() {
                zones[segment] = Zone::from_slot(position);
            }
            zones
        }
        ZoneStrategy::EvenBlocks => {
            let per_zone = count.div_ceil(4).max(1);
            (0..count).map(|i| Zone::from_slot(i / per_zone)).collect()
        }
    }
}

fn proportional_split(count: usize) -> Vec<Zone> {
    let top = ceil_percent(count, 30);
    let bottom = ceil_percent(count, 30).min(count - top);
    let left = ceil_percent(count, 20).min(count - top - bottom);

    (0..count)
        .map(|i| {
            if i < top {
                Zone::Top
            } else if i < top + bottom {
                Zone::Bottom
            } else if i < top + bottom + left {
                Zone::Left
            } else {
                Zone::Right
            }
        })
        .collect()
}

/// `⌈count × percent / 100⌉` in integer arithmetic.
fn ceil_percent(count: usize, percent: usize) -> usize {
    (count * percent).div_ceil(100)
}

/// Side zones stack vertically unless the optional horizontal roll succeeds;
/// top/bottom are always horizontal. Draws from `rng` only for side zones with a
/// non-zero `side_horizontal_chance`.
pub fn orientation_for<R: Rng + ?Sized>(zone: Zone, config: &LayoutConfig, rng: &mut R) -> Orientation {
    if !zone.is_side() {
        return Orientation::Horizontal;
    }
    if config.side_horizontal_chance > 0.0 && rng.gen_bool(config.side_horizontal_chance) {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Band geometry
// ────────────────────────────────────────────────────────────────────────────

/// Anchor ranges for a zone. Top/bottom bands span the full padded width and are
/// `frame_thickness` deep; side bands span the full padded height and are
/// `frame_thickness × side_band_ratio` wide.
pub fn band(zone: Zone, canvas: &CanvasFrame, config: &LayoutConfig) -> Band {
    let w = canvas.width as f64;
    let h = canvas.height as f64;
    let pad = config.padding;
    let depth = config.frame_thickness(canvas);
    let side_depth = depth * config.side_band_ratio;

    match zone {
        Zone::Top => Band {
            x: (pad, w - pad),
            y: (pad, pad + depth),
        },
        Zone::Bottom => Band {
            x: (pad, w - pad),
            y: (h - pad - depth, h - pad),
        },
        Zone::Left => Band {
            x: (pad, pad + side_depth),
            y: (pad, h - pad),
        },
        Zone::Right => Band {
            x: (w - pad - side_depth, w - pad),
            y: (pad, h - pad),
        },
    }
}

//! Scatter layout: places every segment in an edge band around the title.
//!
//! # Search per segment
//! 1. Draw a font size from the range and an orientation from the zone.
//! 2. With grid bias on, target the least-populated edge cell of the zone.
//! 3. Sample up to `max_attempts` anchors. Candidates whose box touches the title
//!    exclusion rect are discarded; the rest are scored by how many placed boxes they hit.
//! 4. Accept the first zero-overlap candidate, otherwise the lowest-overlap one seen
//!    (first found wins ties).
//! 5. If every sample hit the title, either accept the last sample
//!    (`allow_title_overlap_on_exhaustion`) or sweep a lattice over the band for a
//!    title-free anchor.
//!
//! This is a bounded greedy search, not a packing solver. A degraded layout is
//! returned rather than an error; `PlacementOutcome` records what happened.
#![allow(dead_code)]

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::layout::error::LayoutError;
use crate::layout::exclusion::exclusion_rect;
use crate::layout::frame::{CanvasFrame, FontSizeRange, LayoutConfig, TitleSpec};
use crate::layout::geometry::{count_overlaps, estimate_box, overlaps_title, Orientation, Rect};
use crate::layout::grid::GridOccupancy;
use crate::layout::sampler::CandidateSampler;
use crate::layout::zones::{assign_zones, band, orientation_for, Zone, ZoneStrategy};

/// Anchors per axis swept when random sampling never escaped the title.
const SWEEP_STEPS: u32 = 16;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// A segment with its final position. `(x, y)` is the top-left of the text for
/// horizontal segments and the top-left of the first glyph for vertical ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedText {
    pub text: String,
    pub font_size: u32,
    pub x: f64,
    pub y: f64,
    pub orientation: Orientation,
}

impl PlacedText {
    pub fn bounding_box(&self) -> Rect {
        estimate_box(self.x, self.y, &self.text, self.font_size as f64, self.orientation)
    }
}

/// How a segment's placement was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementOutcome {
    /// Found a candidate touching neither the title nor any earlier segment.
    Clear,
    /// Budget exhausted; accepted the title-free candidate with the fewest overlaps.
    Fallback { overlaps: usize },
    /// Budget exhausted and no title-free anchor was found; the box touches the title.
    TitleOverlap,
}

impl PlacementOutcome {
    pub fn is_exhausted(&self) -> bool {
        !matches!(self, PlacementOutcome::Clear)
    }
}

/// Full result of a layout call. All vectors are indexed by original segment position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub exclusion: Rect,
    pub placements: Vec<PlacedText>,
    pub zones: Vec<Zone>,
    pub outcomes: Vec<PlacementOutcome>,
    /// Samples drawn for each segment (at most `max_attempts`).
    pub attempts: Vec<u32>,
}

impl LayoutReport {
    pub fn exhausted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_exhausted()).count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `segments` around the title and returns one placement per segment, in input order.
///
/// Segments are expected to be trimmed and non-empty; the caller filters blank lines.
pub fn layout_segments<S, R>(
    canvas: &CanvasFrame,
    title: &TitleSpec,
    segments: &[S],
    font_range: FontSizeRange,
    strategy: ZoneStrategy,
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<Vec<PlacedText>, LayoutError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    layout_segments_with_report(canvas, title, segments, font_range, strategy, config, rng)
        .map(|report| report.placements)
}

/// Same as [`layout_segments`] but also returns zones, outcomes and attempt counts.
pub fn layout_segments_with_report<S, R>(
    canvas: &CanvasFrame,
    title: &TitleSpec,
    segments: &[S],
    font_range: FontSizeRange,
    strategy: ZoneStrategy,
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<LayoutReport, LayoutError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    canvas.validate()?;
    font_range.validate()?;
    config.validate()?;

    let exclusion = exclusion_rect(title, canvas, config);
    let zones = assign_zones(segments.len(), strategy, rng);

    let mut state = SearchState {
        placed: Vec::with_capacity(segments.len()),
        grid: GridOccupancy::new(canvas, config.grid_rows, config.grid_cols),
    };
    let mut report = LayoutReport {
        exclusion,
        placements: Vec::with_capacity(segments.len()),
        zones: zones.clone(),
        outcomes: Vec::with_capacity(segments.len()),
        attempts: Vec::with_capacity(segments.len()),
    };

    for (segment, &zone) in segments.iter().zip(&zones) {
        let text = segment.as_ref();
        let font_size = rng.gen_range(font_range.min..=font_range.max);
        let orientation = orientation_for(zone, config, rng);

        let target = if config.grid_bias {
            let cell = state.grid.least_populated_cell(zone, rng);
            Some(state.grid.cell_rect(&cell))
        } else {
            None
        };
        let sampler = CandidateSampler::new(band(zone, canvas, config), target, canvas);

        let request = SegmentRequest {
            text,
            font_size: font_size as f64,
            orientation,
        };
        let accepted = state.place(&request, &sampler, &exclusion, config, rng);

        if accepted.outcome == PlacementOutcome::TitleOverlap {
            warn!(segment = text, ?zone, "No title-free anchor in zone band; segment overlaps title");
        } else if accepted.outcome.is_exhausted() {
            debug!(segment = text, ?zone, outcome = ?accepted.outcome, "Attempt budget exhausted");
        }

        report.placements.push(PlacedText {
            text: text.to_string(),
            font_size,
            x: accepted.x,
            y: accepted.y,
            orientation,
        });
        report.outcomes.push(accepted.outcome);
        report.attempts.push(accepted.attempts);
    }

    debug!(
        segments = segments.len(),
        exhausted = report.exhausted_count(),
        placed_in_grid = state.grid.total(),
        "Scatter layout complete"
    );

    Ok(report)
}

// ────────────────────────────────────────────────────────────────────────────
// Search internals
// ────────────────────────────────────────────────────────────────────────────

/// Everything mutable during one layout call. Never outlives it.
struct SearchState {
    placed: Vec<Rect>,
    grid: GridOccupancy,
}

struct SegmentRequest<'a> {
    text: &'a str,
    font_size: f64,
    orientation: Orientation,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    x: f64,
    y: f64,
    bbox: Rect,
    overlaps: usize,
}

struct Accepted {
    x: f64,
    y: f64,
    outcome: PlacementOutcome,
    attempts: u32,
}

impl SearchState {
    fn candidate(&self, request: &SegmentRequest, (x, y): (f64, f64)) -> Candidate {
        let bbox = estimate_box(x, y, request.text, request.font_size, request.orientation);
        Candidate {
            x,
            y,
            bbox,
            overlaps: 0,
        }
    }

    /// Runs the sample → evaluate → accept/retry loop and commits the winner.
    fn place<R: Rng + ?Sized>(
        &mut self,
        request: &SegmentRequest,
        sampler: &CandidateSampler,
        exclusion: &Rect,
        config: &LayoutConfig,
        rng: &mut R,
    ) -> Accepted {
        let mut best: Option<Candidate> = None;
        let mut last_title_hit: Option<Candidate> = None;

        for attempt in 1..=config.max_attempts {
            let mut candidate = self.candidate(request, sampler.sample(rng));

            if overlaps_title(&candidate.bbox, exclusion) {
                last_title_hit = Some(candidate);
                continue;
            }

            candidate.overlaps = count_overlaps(&candidate.bbox, &self.placed);
            if candidate.overlaps == 0 {
                return self.commit(candidate, PlacementOutcome::Clear, attempt);
            }
            if best.map_or(true, |b| candidate.overlaps < b.overlaps) {
                best = Some(candidate);
            }
        }

        let attempts = config.max_attempts;
        if best.is_none() && !config.allow_title_overlap_on_exhaustion {
            best = self.sweep(request, sampler, exclusion);
        }

        match best {
            Some(c) => self.commit(c, PlacementOutcome::Fallback { overlaps: c.overlaps }, attempts),
            None => {
                let c = match last_title_hit {
                    Some(c) => c,
                    None => self.candidate(request, sampler.sample(rng)),
                };
                self.commit(c, PlacementOutcome::TitleOverlap, attempts)
            }
        }
    }

    /// Deterministic scan of the band for the title-free anchor with fewest overlaps.
    fn sweep(
        &self,
        request: &SegmentRequest,
        sampler: &CandidateSampler,
        exclusion: &Rect,
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for point in sampler.lattice(SWEEP_STEPS) {
            let mut candidate = self.candidate(request, point);
            if overlaps_title(&candidate.bbox, exclusion) {
                continue;
            }
            candidate.overlaps = count_overlaps(&candidate.bbox, &self.placed);
            if best.map_or(true, |b| candidate.overlaps < b.overlaps) {
                best = Some(candidate);
            }
            if candidate.overlaps == 0 {
                break;
            }
        }

        best
    }

    fn commit(&mut self, candidate: Candidate, outcome: PlacementOutcome, attempts: u32) -> Accepted {
        self.placed.push(candidate.bbox);
        self.grid.record(candidate.x, candidate.y);
        Accepted {
            x: candidate.x,
            y: candidate.y,
            outcome,
            attempts,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

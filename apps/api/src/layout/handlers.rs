//! Axum route handlers for the Layout API.

use axum::{extract::State, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::layout::compose::{compose, BackgroundImage, DrawOp};
use crate::layout::frame::{AspectRatio, CanvasFrame, FontSizeRange, LayoutConfig, TitleSpec};
use crate::layout::geometry::Rect;
use crate::layout::search::{layout_segments_with_report, LayoutReport, PlacedText, PlacementOutcome};
use crate::layout::zones::ZoneStrategy;
use crate::state::AppState;

const DEFAULT_TITLE_FONT_SIZE: u32 = 100;

/// Each placement scans every earlier one per attempt, so a request's cost grows with the
/// square of its segment count.
pub const MAX_SEGMENTS: usize = 200;
/// Largest canvas side accepted, in pixels.
pub const MAX_CANVAS_DIMENSION: u32 = 4096;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutRequest {
    /// Title text; `\n` separates lines.
    pub title: String,
    /// One segment per line. Blank lines are dropped.
    pub content: String,
    /// Preset canvas. Ignored when `canvas` is given.
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    #[serde(default)]
    pub canvas: Option<CanvasFrame>,
    #[serde(default = "default_title_font_size")]
    pub title_font_size: u32,
    #[serde(default)]
    pub font_size_range: FontSizeRange,
    #[serde(default)]
    pub strategy: ZoneStrategy,
    /// Reuse a previous seed to reproduce a layout. Omit for a fresh one.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_title_font_size() -> u32 {
    DEFAULT_TITLE_FONT_SIZE
}

fn default_highlight() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ComposeRequest {
    #[serde(flatten)]
    pub layout: LayoutRequest,
    #[serde(default = "default_highlight")]
    pub highlight: bool,
    #[serde(default)]
    pub background: Option<BackgroundImage>,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub seed: u64,
    pub canvas: CanvasFrame,
    pub exclusion: Rect,
    pub placements: Vec<PlacedText>,
    pub outcomes: Vec<PlacementOutcome>,
    pub exhausted: usize,
}

#[derive(Debug, Serialize)]
pub struct ComposeResponse {
    pub seed: u64,
    pub canvas: CanvasFrame,
    pub placements: Vec<PlacedText>,
    pub ops: Vec<DrawOp>,
}

/// Inputs to one engine run, owned so they can move into `spawn_blocking`.
#[derive(Debug, Clone)]
struct LayoutJob {
    canvas: CanvasFrame,
    title: TitleSpec,
    segments: Vec<String>,
    font_range: FontSizeRange,
    strategy: ZoneStrategy,
    config: LayoutConfig,
    seed: u64,
}

impl LayoutJob {
    /// Builds the job and enforces the per-request limits. Engine-level checks (canvas
    /// and font range) run inside the layout call.
    fn from_request(request: &LayoutRequest, config: &LayoutConfig) -> Result<Self, AppError> {
        if request.title_font_size == 0 {
            return Err(AppError::Validation(
                "title_font_size must be positive".to_string(),
            ));
        }

        let canvas = request.canvas.unwrap_or_else(|| request.aspect_ratio.frame());
        if canvas.width > MAX_CANVAS_DIMENSION || canvas.height > MAX_CANVAS_DIMENSION {
            return Err(AppError::Validation(format!(
                "canvas {}x{} exceeds the {MAX_CANVAS_DIMENSION}px limit",
                canvas.width, canvas.height
            )));
        }

        let segments = split_segments(&request.content);
        if segments.len() > MAX_SEGMENTS {
            return Err(AppError::Validation(format!(
                "{} segments exceeds the limit of {MAX_SEGMENTS}",
                segments.len()
            )));
        }

        Ok(LayoutJob {
            canvas,
            title: TitleSpec::from_text(&request.title, request.title_font_size),
            segments,
            font_range: request.font_size_range,
            strategy: request.strategy,
            config: config.clone(),
            seed: request.seed.unwrap_or_else(rand::random),
        })
    }
}

/// One segment per line, trimmed, blank lines dropped.
pub fn split_segments(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/layout
///
/// Scatters the content segments around the title. The seed is echoed back; sending it
/// again with the same inputs reproduces the layout exactly.
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    let job = LayoutJob::from_request(&request, &state.config.layout)?;
    let (seed, canvas) = (job.seed, job.canvas);
    let report = run_layout(job).await?;

    Ok(Json(LayoutResponse {
        seed,
        canvas,
        exclusion: report.exclusion,
        exhausted: report.exhausted_count(),
        placements: report.placements,
        outcomes: report.outcomes,
    }))
}

/// POST /api/v1/compose
///
/// Runs the layout and returns the ordered draw list for the renderer.
pub async fn handle_compose(
    State(state): State<AppState>,
    Json(request): Json<ComposeRequest>,
) -> Result<Json<ComposeResponse>, AppError> {
    let job = LayoutJob::from_request(&request.layout, &state.config.layout)?;
    let (seed, canvas, title) = (job.seed, job.canvas, job.title.clone());
    let report = run_layout(job).await?;

    let ops = compose(
        &canvas,
        &title,
        &report.placements,
        request.background.as_ref(),
        request.highlight,
    );

    Ok(Json(ComposeResponse {
        seed,
        canvas,
        placements: report.placements,
        ops,
    }))
}

/// Runs the engine on the blocking pool. The search is bounded but CPU-only, so it
/// is kept off the async workers.
async fn run_layout(job: LayoutJob) -> Result<LayoutReport, AppError> {
    let segment_count = job.segments.len();
    let seed = job.seed;

    let report = tokio::task::spawn_blocking(move || {
        let mut rng = StdRng::seed_from_u64(job.seed);
        layout_segments_with_report(
            &job.canvas,
            &job.title,
            &job.segments,
            job.font_range,
            job.strategy,
            &job.config,
            &mut rng,
        )
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))??;

    info!(
        seed,
        segments = segment_count,
        exhausted = report.exhausted_count(),
        "Layout generated"
    );

    Ok(report)
}

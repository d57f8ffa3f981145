use thiserror::Error;

/// Invalid inputs to a layout call. Raised before any random draw is made.
///
/// Failing to find an overlap-free slot is never an error: the search falls back to the
/// best candidate it saw and reports that through `PlacementOutcome`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("font size range is inverted: min {min} > max {max}")]
    InvalidFontRange { min: u32, max: u32 },

    #[error("occupancy grid needs at least one row and column, got {rows}x{cols}")]
    InvalidGrid { rows: u32, cols: u32 },

    #[error("attempt budget must be at least 1")]
    InvalidAttemptBudget,

    #[error("side horizontal chance must be within 0..=1")]
    InvalidSideChance,
}

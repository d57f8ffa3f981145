//! Per-call occupancy grid that spreads segments evenly along each zone's edge.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::layout::frame::CanvasFrame;
use crate::layout::geometry::Rect;
use crate::layout::zones::Zone;

/// A grid cell and the number of segments anchored inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub count: u32,
}

/// `rows × cols` equal cells over the canvas, with a placement counter per cell.
///
/// Created fresh for every layout call and dropped with it.
#[derive(Debug, Clone)]
pub struct GridOccupancy {
    rows: u32,
    cols: u32,
    cell_w: f64,
    cell_h: f64,
    counts: Vec<u32>,
}

impl GridOccupancy {
    pub fn new(canvas: &CanvasFrame, rows: u32, cols: u32) -> Self {
        GridOccupancy {
            rows,
            cols,
            cell_w: canvas.width as f64 / cols as f64,
            cell_h: canvas.height as f64 / rows as f64,
            counts: vec![0; (rows * cols) as usize],
        }
    }

    fn index(&self, row: u32, col: u32) -> usize {
        (row * self.cols + col) as usize
    }

    fn cell(&self, row: u32, col: u32) -> GridCell {
        GridCell {
            row,
            col,
            count: self.counts[self.index(row, col)],
        }
    }

    /// Cells touching the zone's canvas edge: row 0, last row, col 0 or last col.
    pub fn edge_cells(&self, zone: Zone) -> Vec<GridCell> {
        match zone {
            Zone::Top => (0..self.cols).map(|c| self.cell(0, c)).collect(),
            Zone::Bottom => (0..self.cols).map(|c| self.cell(self.rows - 1, c)).collect(),
            Zone::Left => (0..self.rows).map(|r| self.cell(r, 0)).collect(),
            Zone::Right => (0..self.rows).map(|r| self.cell(r, self.cols - 1)).collect(),
        }
    }

    /// Picks uniformly among the zone's edge cells with the lowest count.
    pub fn least_populated_cell<R: Rng + ?Sized>(&self, zone: Zone, rng: &mut R) -> GridCell {
        let edge = self.edge_cells(zone);
        let min = edge.iter().map(|c| c.count).min().unwrap_or(0);
        let ties: Vec<GridCell> = edge.into_iter().filter(|c| c.count == min).collect();

        // edge_cells is never empty for a validated grid (rows, cols >= 1)
        ties.choose(rng).copied().unwrap_or(GridCell {
            row: 0,
            col: 0,
            count: 0,
        })
    }

    /// Pixel extent of a cell.
    pub fn cell_rect(&self, cell: &GridCell) -> Rect {
        Rect::from_origin(
            cell.col as f64 * self.cell_w,
            cell.row as f64 * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }

    /// Cell containing a point. Points on the far canvas edge belong to the last row/column.
    pub fn cell_at(&self, x: f64, y: f64) -> (u32, u32) {
        let col = ((x / self.cell_w).floor().max(0.0) as u32).min(self.cols - 1);
        let row = ((y / self.cell_h).floor().max(0.0) as u32).min(self.rows - 1);
        (row, col)
    }

    /// Counts a placement in whichever cell contains its anchor. With grid bias on this is
    /// the targeted cell unless the band misses the cell entirely.
    pub fn record(&mut self, x: f64, y: f64) {
        let (row, col) = self.cell_at(x, y);
        let idx = self.index(row, col);
        self.counts[idx] += 1;
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

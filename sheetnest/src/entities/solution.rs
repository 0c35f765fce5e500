use std::time::Instant;

use crate::entities::{PieceState, Sheet};

/// Snapshot of a [`NestProblem`](crate::entities::NestProblem) at a specific moment.
/// Once packing completes, this is the final layout.
#[derive(Debug, Clone)]
pub struct NestSolution {
    /// Sheets in the order they were opened
    pub sheets: Vec<Sheet>,
    pub piece_states: Vec<PieceState>,
    /// Instant the solution was created
    pub time_stamp: Instant,
}

impl NestSolution {
    /// Unfilled area of every sheet, in sheet order
    pub fn unfilled_areas(&self) -> Vec<f64> {
        self.sheets.iter().map(|s| s.unfilled_area()).collect()
    }

    /// Fraction of the total sheet area that is covered by pieces
    pub fn density(&self) -> f64 {
        let total_area = self.sheets.iter().map(|s| s.area()).sum::<f64>();
        let covered = self.sheets.iter().map(|s| s.covered_area()).sum::<f64>();
        covered / total_area
    }

    pub fn n_sheets(&self) -> usize {
        self.sheets.len()
    }

    pub fn n_placed(&self) -> usize {
        self.sheets.iter().map(|s| s.placed.len()).sum()
    }
}

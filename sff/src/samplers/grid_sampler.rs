use serde::{Deserialize, Serialize};
use sheetnest::util::FPA;

/// Lazily generates candidate positions for the bottom left corner of a shape's bounding box.
/// The order of the positions defines which candidate is found first.
pub trait CandidateSampler {
    /// Candidate positions in evaluation order
    fn positions(&self) -> impl Iterator<Item = (f64, f64)>;

    fn n_positions(&self) -> usize;
}

/// Order in which the position grid is scanned
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// `y` in the outer loop, `x` in the inner loop
    #[default]
    RowMajor,
    /// `x` in the outer loop, `y` in the inner loop
    ColumnMajor,
}

/// Regular grid over `[0, x_range] × [0, y_range]`, scanned row by row (bottom to top, left to right).
#[derive(Debug, Clone, Copy)]
pub struct RowMajorGrid {
    pub step: f64,
    pub n_x: usize,
    pub n_y: usize,
}

impl RowMajorGrid {
    /// Both ranges are inclusive. A negative range (shape wider than the sheet) yields no positions.
    pub fn new(x_range: f64, y_range: f64, step: f64) -> Self {
        Self {
            step,
            n_x: n_grid_steps(x_range, step),
            n_y: n_grid_steps(y_range, step),
        }
    }
}

impl CandidateSampler for RowMajorGrid {
    fn positions(&self) -> impl Iterator<Item = (f64, f64)> {
        let Self { step, n_x, n_y } = *self;
        (0..n_y).flat_map(move |j| (0..n_x).map(move |i| (i as f64 * step, j as f64 * step)))
    }

    fn n_positions(&self) -> usize {
        self.n_x * self.n_y
    }
}

/// Regular grid over `[0, x_range] × [0, y_range]`, scanned column by column (left to right, bottom to top).
#[derive(Debug, Clone, Copy)]
pub struct ColumnMajorGrid {
    pub step: f64,
    pub n_x: usize,
    pub n_y: usize,
}

impl ColumnMajorGrid {
    /// Both ranges are inclusive. A negative range (shape taller than the sheet) yields no positions.
    pub fn new(x_range: f64, y_range: f64, step: f64) -> Self {
        Self {
            step,
            n_x: n_grid_steps(x_range, step),
            n_y: n_grid_steps(y_range, step),
        }
    }
}

impl CandidateSampler for ColumnMajorGrid {
    fn positions(&self) -> impl Iterator<Item = (f64, f64)> {
        let Self { step, n_x, n_y } = *self;
        (0..n_x).flat_map(move |i| (0..n_y).map(move |j| (i as f64 * step, j as f64 * step)))
    }

    fn n_positions(&self) -> usize {
        self.n_x * self.n_y
    }
}

/// Number of values `k · step` (k = 0, 1, ...) that do not exceed `range`, within floating point tolerance.
/// Multiples are computed directly to avoid accumulating rounding errors.
pub fn n_grid_steps(range: f64, step: f64) -> usize {
    debug_assert!(step > 0.0);
    if FPA(range) < FPA(0.0) || !range.is_finite() {
        return 0;
    }
    let range = range.max(0.0);
    let mut n = (range / step).floor() as usize;
    if FPA((n + 1) as f64 * step) <= FPA(range) {
        n += 1;
    }
    n + 1
}

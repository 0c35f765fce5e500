use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use sheetnest::io::svg::SvgDrawOptions;

use crate::samplers::ScanOrder;

/// Candidate budget per rotation unless configured otherwise
pub const DEFAULT_MAX_CANDIDATES_PER_ROTATION: usize = 100_000;

/// Configuration for the similarity first-fit optimizer.
/// Lengths are in the units of the input, sheet dimensions default to A4 in millimetres.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct SFFConfig {
    pub sheet_width: f64,
    pub sheet_height: f64,
    /// Space reserved along the sheet dimensions when pieces are rescaled to fit
    pub margin: f64,
    /// Minimum distance between any two pieces on the same sheet, also the step of the position grid
    pub clearance: f64,
    /// Step between the rotations that are tried, in degrees
    pub rotation_step: f64,
    /// Width of the drawn outlines. Pieces are shrunk by half of it if it is smaller than the clearance.
    pub line_thickness: f64,
    /// Rescale all pieces uniformly so the largest dimensions fit within the sheet minus the margin
    pub scale_to_fit: bool,
    /// Which sheets are tried before a new one is opened
    pub sheet_selection: SheetSelection,
    pub scan_order: ScanOrder,
    /// Radius of the FastDTW search window
    pub dtw_radius: usize,
    /// Maximum number of candidate positions evaluated per rotation.
    /// Bounded by [`DEFAULT_MAX_CANDIDATES_PER_ROTATION`] unless set, `None` evaluates every grid position.
    pub max_candidates_per_rotation: Option<usize>,
    /// Evaluate rotations and similarity distances in parallel
    pub parallel: bool,
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for SFFConfig {
    fn default() -> Self {
        Self {
            sheet_width: 210.0,
            sheet_height: 297.0,
            margin: 10.0,
            clearance: 5.0,
            rotation_step: 90.0,
            line_thickness: 0.5,
            scale_to_fit: true,
            sheet_selection: SheetSelection::Latest,
            scan_order: ScanOrder::RowMajor,
            dtw_radius: 1,
            max_candidates_per_rotation: Some(DEFAULT_MAX_CANDIDATES_PER_ROTATION),
            parallel: false,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}

impl SFFConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.sheet_width > 0.0 && self.sheet_height > 0.0,
            "sheet dimensions must be positive: {}x{}",
            self.sheet_width,
            self.sheet_height
        );
        ensure!(
            self.clearance > 0.0,
            "clearance must be positive: {}",
            self.clearance
        );
        ensure!(
            self.rotation_step > 0.0 && self.rotation_step.is_finite(),
            "rotation step must be positive: {}",
            self.rotation_step
        );
        ensure!(
            self.margin >= 0.0,
            "margin must be non-negative: {}",
            self.margin
        );
        ensure!(
            self.line_thickness >= 0.0,
            "line thickness must be non-negative: {}",
            self.line_thickness
        );
        ensure!(self.dtw_radius >= 1, "DTW radius must be at least 1");
        ensure!(
            self.max_candidates_per_rotation != Some(0),
            "candidate budget must allow at least one candidate"
        );
        Ok(())
    }
}

/// Policy for which existing sheets a piece is offered to before a new sheet is opened
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetSelection {
    /// Only the most recently opened sheet
    #[default]
    Latest,
    /// Every sheet, in the order they were opened
    AllOpen,
}

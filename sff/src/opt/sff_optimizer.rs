use std::fmt::Display;
use std::time::Instant;

use anyhow::Result;
use itertools::Itertools;
use log::{debug, info};
use sheetnest::entities::scaling::scale_to_fit;
use sheetnest::entities::{Instance, NestProblem, NestSolution, Placement, SheetSlot};
use sheetnest::geometry::geo_traits::Shape;
use sheetnest::util::FPA;
use sheetnest::util::assertions::sheet_is_feasible;
use thousands::Separable;

use crate::config::{SFFConfig, SheetSelection};
use crate::opt::search::{SearchOutcome, SearchParams, search};
use crate::opt::similarity::placement_order;

/// Fatal packing failures
#[derive(Debug, Clone, PartialEq)]
pub enum PackError {
    /// A piece is larger than the sheet, detected before any placement is attempted
    OversizedPiece {
        piece_id: u64,
        width: f64,
        height: f64,
        sheet_width: f64,
        sheet_height: f64,
    },
    /// A piece does not fit on an empty sheet
    NoFitOnEmptySheet { piece_id: u64 },
}

impl Display for PackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackError::OversizedPiece {
                piece_id,
                width,
                height,
                sheet_width,
                sheet_height,
            } => write!(
                f,
                "piece {piece_id} ({width:.3}x{height:.3}) exceeds the sheet dimensions ({sheet_width}x{sheet_height})"
            ),
            PackError::NoFitOnEmptySheet { piece_id } => {
                write!(f, "piece {piece_id} does not fit on an empty sheet")
            }
        }
    }
}

impl std::error::Error for PackError {}

/// Similarity first-fit (SFF) optimizer.
///
/// Offers the pieces to the placement search in similarity order and opens a new sheet
/// whenever a piece does not fit on the sheets that are tried.
pub struct SFFOptimizer {
    pub instance: Instance,
    pub problem: NestProblem,
    pub config: SFFConfig,
    /// Factor by which the pieces were rescaled
    pub scale_factor: f64,
    pub candidate_counter: usize,
}

impl SFFOptimizer {
    /// Validates the configuration and, if enabled, rescales the pieces to fit the sheet.
    pub fn new(instance: Instance, config: SFFConfig) -> Result<Self> {
        config.validate()?;
        let (instance, scale_factor) = match config.scale_to_fit {
            true => scale_to_fit(
                &instance,
                config.sheet_width,
                config.sheet_height,
                config.margin,
            )?,
            false => (instance, 1.0),
        };
        let problem = NestProblem::new(instance.clone(), config.sheet_width, config.sheet_height)?;

        Ok(Self {
            instance,
            problem,
            config,
            scale_factor,
            candidate_counter: 0,
        })
    }

    pub fn solve(&mut self) -> Result<NestSolution> {
        let start = Instant::now();

        self.check_piece_dimensions()?;

        let order = placement_order(&self.instance, self.config.dtw_radius, self.config.parallel);
        let params = SearchParams::from_config(&self.config);

        for piece_id in order {
            if self.problem.is_placed(piece_id) {
                continue;
            }
            let placement = self.search_sheets(piece_id, &params)?;
            let d_transf = placement.d_transf;
            let sheet_idx = self.problem.place_piece(placement);
            info!(
                "[SFF] placing piece {}/{} with id {} at [{}] on sheet {}",
                self.problem.n_placed(),
                self.instance.n_pieces(),
                self.instance.piece(piece_id).ext_id,
                d_transf,
                sheet_idx
            );
        }

        let solution = self.problem.save();
        debug_assert!(
            solution
                .sheets
                .iter()
                .all(|s| sheet_is_feasible(s, self.config.clearance))
        );

        info!(
            "[SFF] optimization finished in {:.3}ms ({} candidates)",
            start.elapsed().as_secs_f64() * 1000.0,
            self.candidate_counter.separate_with_commas()
        );
        info!(
            "[SFF] solution contains {} pieces on {} sheets with a density of {:.3}%",
            solution.n_placed(),
            solution.n_sheets(),
            solution.density() * 100.0
        );

        Ok(solution)
    }

    /// Every piece must fit within the sheet's dimensions, otherwise nothing is packed at all.
    fn check_piece_dimensions(&self) -> Result<()> {
        let (sheet_width, sheet_height) = (self.config.sheet_width, self.config.sheet_height);
        for piece in self.instance.pieces.iter() {
            let bbox = piece.shape.bbox();
            if FPA(bbox.width()) > FPA(sheet_width) || FPA(bbox.height()) > FPA(sheet_height) {
                return Err(PackError::OversizedPiece {
                    piece_id: piece.ext_id,
                    width: bbox.width(),
                    height: bbox.height(),
                    sheet_width,
                    sheet_height,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Tries the sheets allowed by the [`SheetSelection`] policy, then a new sheet.
    fn search_sheets(&mut self, piece_id: usize, params: &SearchParams) -> Result<Placement> {
        let piece = self.instance.piece(piece_id);
        let sheets_to_try = match self.config.sheet_selection {
            SheetSelection::Latest => vec![self.problem.latest_sheet_idx()],
            SheetSelection::AllOpen => (0..self.problem.sheets.len()).collect_vec(),
        };

        for sheet_idx in sheets_to_try {
            let sheet = &self.problem.sheets[sheet_idx];
            let obstacles = sheet.obstacles().collect_vec();
            match search(&piece.shape, &obstacles, params) {
                SearchOutcome::Placed(c) => {
                    self.candidate_counter += c.n_evaluated;
                    return Ok(Placement {
                        slot: SheetSlot::Existing(sheet_idx),
                        piece_id,
                        d_transf: c.d_transf,
                        shape: c.shape,
                    });
                }
                SearchOutcome::NoFit {
                    n_evaluated,
                    budget_exhausted,
                } => {
                    self.candidate_counter += n_evaluated;
                    if sheet.is_empty() {
                        return Err(PackError::NoFitOnEmptySheet {
                            piece_id: piece.ext_id,
                        }
                        .into());
                    }
                    debug!(
                        "[SFF] piece {} does not fit on sheet {sheet_idx} (budget exhausted: {budget_exhausted})",
                        piece.ext_id
                    );
                }
            }
        }

        info!(
            "[SFF] opening sheet {} for piece {}",
            self.problem.sheets.len(),
            piece.ext_id
        );
        match search(&piece.shape, &[], params) {
            SearchOutcome::Placed(c) => {
                self.candidate_counter += c.n_evaluated;
                Ok(Placement {
                    slot: SheetSlot::New,
                    piece_id,
                    d_transf: c.d_transf,
                    shape: c.shape,
                })
            }
            SearchOutcome::NoFit {
                budget_exhausted, ..
            } => {
                debug!("[SFF] no fit on an empty sheet (budget exhausted: {budget_exhausted})");
                Err(PackError::NoFitOnEmptySheet {
                    piece_id: piece.ext_id,
                }
                .into())
            }
        }
    }
}

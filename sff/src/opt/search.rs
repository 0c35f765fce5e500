use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use log::{debug, warn};
use rayon::prelude::*;
use sheetnest::geometry::geo_traits::{
    CollidesWith, DistanceTo, Shape, Transformable, TransformableFrom,
};
use sheetnest::geometry::primitives::{Rect, Region};
use sheetnest::geometry::shape_modification::{ShapeModifyMode, offset_region, repair};
use sheetnest::geometry::{DTransformation, Transformation};
use sheetnest::util::FPA;

use crate::config::SFFConfig;
use crate::samplers::rotations::rotation_angles;
use crate::samplers::{CandidateSampler, ColumnMajorGrid, RowMajorGrid, ScanOrder};

/// Everything the placement search needs to know about the sheet and the constraints
#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub sheet_width: f64,
    pub sheet_height: f64,
    pub clearance: f64,
    /// Step between rotations, in degrees
    pub rotation_step: f64,
    pub line_thickness: f64,
    pub scan_order: ScanOrder,
    pub max_candidates_per_rotation: Option<usize>,
    pub parallel: bool,
}

impl SearchParams {
    pub fn from_config(config: &SFFConfig) -> Self {
        Self {
            sheet_width: config.sheet_width,
            sheet_height: config.sheet_height,
            clearance: config.clearance,
            rotation_step: config.rotation_step,
            line_thickness: config.line_thickness,
            scan_order: config.scan_order,
            max_candidates_per_rotation: config.max_candidates_per_rotation,
            parallel: config.parallel,
        }
    }

    pub fn sheet_rect(&self) -> Rect {
        Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: self.sheet_width,
            y_max: self.sheet_height,
        }
    }
}

/// A collision-free position for a piece
#[derive(Debug, Clone)]
pub struct CandidatePlacement {
    /// Rotation (degrees) and translation that bring the clearance-adjusted outline to its place
    pub d_transf: DTransformation,
    /// The accepted geometry
    pub shape: Region,
    /// Number of candidates evaluated before (and including) the accepted one
    pub n_evaluated: usize,
}

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Placed(CandidatePlacement),
    /// No rotation and position combination is collision-free
    NoFit {
        n_evaluated: usize,
        /// At least one rotation was cut short by the candidate budget
        budget_exhausted: bool,
    },
}

/// Searches for the first collision-free placement of `piece` on a sheet already containing `obstacles`.
///
/// Rotations are tried in ascending order. For each rotation, positions of the bounding box's
/// bottom left corner are scanned on a grid with a step equal to the clearance.
/// A candidate is accepted if it lies within the sheet and keeps at least the clearance to every obstacle.
/// The outcome is the same whether or not rotations are evaluated in parallel.
pub fn search(piece: &Region, obstacles: &[&Region], params: &SearchParams) -> SearchOutcome {
    let Some(base) = repair(piece) else {
        warn!("[SEARCH] piece outline could not be repaired, no placement possible");
        return SearchOutcome::NoFit {
            n_evaluated: 0,
            budget_exhausted: false,
        };
    };

    //the drawn line takes up space on both sides of the outline
    let reference = match params.line_thickness > 0.0 && params.line_thickness < params.clearance
    {
        true => match offset_region(
            &base,
            ShapeModifyMode::Deflate,
            params.line_thickness / 2.0,
        ) {
            Ok(shrunk) => shrunk,
            Err(e) => {
                warn!("[SEARCH] could not shrink piece outline, using it unmodified: {e}");
                base
            }
        },
        false => base,
    };

    let pivot = reference.centroid();
    let n_evaluated = AtomicUsize::new(0);
    let budget_exhausted = AtomicBool::new(false);

    let try_rotation = |angle: f64| -> Option<CandidatePlacement> {
        let rotation = Transformation::from_rotation_around(angle.to_radians(), pivot);
        let mut rotated = reference.transform_clone(&rotation);
        if !rotated.is_valid() {
            rotated = repair(&rotated)?;
        }

        //move the bottom left corner of the bounding box to the origin
        let bbox = rotated.bbox();
        let normalize = Transformation::from_translation((-bbox.x_min, -bbox.y_min));
        let normalized = rotated.transform_clone(&normalize);

        let x_range = params.sheet_width - bbox.width();
        let y_range = params.sheet_height - bbox.height();
        let scan_ctx = ScanContext {
            obstacles,
            params,
            angle,
            n_evaluated: &n_evaluated,
            budget_exhausted: &budget_exhausted,
        };
        let ((x, y), shape) = match params.scan_order {
            ScanOrder::RowMajor => scan_ctx.scan(
                &normalized,
                RowMajorGrid::new(x_range, y_range, params.clearance),
            ),
            ScanOrder::ColumnMajor => scan_ctx.scan(
                &normalized,
                ColumnMajorGrid::new(x_range, y_range, params.clearance),
            ),
        }?;

        let transf = rotation.transform(&normalize).translate((x, y));
        let d_transf = DTransformation::new(angle, transf.decompose().translation());

        Some(CandidatePlacement {
            d_transf,
            shape,
            n_evaluated: 0,
        })
    };

    let angles = rotation_angles(params.rotation_step);
    let found = match params.parallel {
        true => angles.par_iter().find_map_first(|&a| try_rotation(a)),
        false => angles.iter().find_map(|&a| try_rotation(a)),
    };

    let n_evaluated = n_evaluated.load(Ordering::Relaxed);
    match found {
        Some(mut placement) => {
            placement.n_evaluated = n_evaluated;
            debug!(
                "[SEARCH] accepted [{}] after {} candidates",
                placement.d_transf, n_evaluated
            );
            SearchOutcome::Placed(placement)
        }
        None => SearchOutcome::NoFit {
            n_evaluated,
            budget_exhausted: budget_exhausted.load(Ordering::Relaxed),
        },
    }
}

struct ScanContext<'a> {
    obstacles: &'a [&'a Region],
    params: &'a SearchParams,
    angle: f64,
    n_evaluated: &'a AtomicUsize,
    budget_exhausted: &'a AtomicBool,
}

impl ScanContext<'_> {
    /// Evaluates the positions of `sampler` in order, returning the first valid one and the shape at that position
    fn scan(&self, shape: &Region, sampler: impl CandidateSampler) -> Option<((f64, f64), Region)> {
        let sheet_rect = self.params.sheet_rect();
        let budget = self.params.max_candidates_per_rotation.unwrap_or(usize::MAX);
        let mut buffer = shape.clone();

        for (k, (x, y)) in sampler.positions().enumerate() {
            if k >= budget {
                debug!(
                    "[SEARCH] candidate budget of {budget} exhausted at {:.1}°, skipping to the next rotation",
                    self.angle
                );
                self.budget_exhausted.store(true, Ordering::Relaxed);
                return None;
            }
            self.n_evaluated.fetch_add(1, Ordering::Relaxed);

            buffer.transform_from(shape, &Transformation::from_translation((x, y)));
            if buffer.within(&sheet_rect) && !collides(&buffer, self.obstacles, self.params.clearance)
            {
                return Some(((x, y), buffer));
            }
        }
        None
    }
}

/// Whether `candidate` comes closer than `clearance` to any of the obstacles
pub fn collides(candidate: &Region, obstacles: &[&Region], clearance: f64) -> bool {
    let reach = candidate.bbox().inflate(clearance);
    obstacles
        .iter()
        .filter(|o| reach.collides_with(&o.bbox()))
        .any(|o| FPA(candidate.distance_to(*o)) < FPA(clearance))
}

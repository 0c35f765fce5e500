use anyhow::{Result, ensure};
use itertools::Itertools;
use log::info;

use crate::entities::{Instance, Piece};
use crate::geometry::Transformation;
use crate::geometry::geo_traits::{Shape, Transformable};

/// Uniform factor which makes the largest piece dimensions fit within the sheet minus the margin.
///
/// The factor is `min((width - margin) / max_piece_width, (height - margin) / max_piece_height)`,
/// where the maxima are taken independently over all pieces. Can be larger than 1.
pub fn scale_to_fit_factor(
    pieces: &[Piece],
    sheet_width: f64,
    sheet_height: f64,
    margin: f64,
) -> Result<f64> {
    let (usable_w, usable_h) = (sheet_width - margin, sheet_height - margin);
    ensure!(
        usable_w > 0.0 && usable_h > 0.0,
        "margin ({margin}) leaves no usable area on a {sheet_width}x{sheet_height} sheet"
    );
    ensure!(!pieces.is_empty(), "cannot compute a scale factor without pieces");

    let bboxes = pieces.iter().map(|p| p.shape.bbox()).collect_vec();
    let max_w = bboxes.iter().map(|b| b.width()).fold(0.0, f64::max);
    let max_h = bboxes.iter().map(|b| b.height()).fold(0.0, f64::max);

    let factor = f64::min(usable_w / max_w, usable_h / max_h);
    ensure!(
        factor.is_finite() && factor > 0.0,
        "invalid scale factor {factor}, max piece dims: {max_w}x{max_h}"
    );
    Ok(factor)
}

/// Scales every piece uniformly by `factor` relative to the origin.
pub fn scale_pieces(pieces: &[Piece], factor: f64) -> Result<Vec<Piece>> {
    ensure!(
        factor.is_finite() && factor > 0.0,
        "scale factor must be finite and positive: {factor}"
    );
    let t = Transformation::from_scale(factor);
    Ok(pieces
        .iter()
        .map(|p| Piece::new(p.id, p.ext_id, p.shape.transform_clone(&t)))
        .collect())
}

/// Rescales all pieces of the instance by a single factor, so that each of them fits on the sheet within the margin.
/// Returns the rescaled instance and the factor that was applied.
pub fn scale_to_fit(
    instance: &Instance,
    sheet_width: f64,
    sheet_height: f64,
    margin: f64,
) -> Result<(Instance, f64)> {
    if instance.pieces.is_empty() {
        return Ok((instance.clone(), 1.0));
    }
    let factor = scale_to_fit_factor(&instance.pieces, sheet_width, sheet_height, margin)?;
    let pieces = scale_pieces(&instance.pieces, factor)?;

    info!(
        "[SCALE] scaled {} pieces by a factor of {:.4}",
        pieces.len(),
        factor
    );

    Ok((Instance::new(instance.name.clone(), pieces), factor))
}

use anyhow::{Result, ensure};
use itertools::Itertools;
use log::{info, warn};

use crate::entities::{Instance, Piece};
use crate::geometry::primitives::{Point, Region, SPolygon};
use crate::geometry::shape_modification::repair;
use crate::io::ext_repr::{ExtInstance, ExtSPolygon};

/// Imports an instance into the library.
///
/// Pieces whose shape does not describe an area (fewer than 3 distinct vertices, or all collinear) are skipped.
/// Self-crossing outlines are kept as they are. The remaining pieces receive consecutive ids in input order.
pub fn import(ext_instance: &ExtInstance) -> Result<Instance> {
    let ext_ids = ext_instance.pieces.iter().map(|p| p.id).collect_vec();
    ensure!(
        ext_ids.iter().all_unique(),
        "piece ids should be unique. IDs: {:?}",
        ext_ids.iter().sorted().collect_vec()
    );

    let mut pieces = vec![];
    for ext_piece in ext_instance.pieces.iter() {
        ensure!(
            ext_piece
                .shape
                .0
                .iter()
                .all(|(x, y)| x.is_finite() && y.is_finite()),
            "piece {} contains non-finite coordinates",
            ext_piece.id
        );
        match import_simple_polygon(&ext_piece.shape) {
            Ok(shape) => {
                let shape = Region::Single(shape);
                match repair(&shape) {
                    Some(_) => pieces.push(Piece::new(pieces.len(), ext_piece.id, shape)),
                    None => warn!(
                        "[IMPORT] skipping piece {}: outline does not enclose any area",
                        ext_piece.id
                    ),
                }
            }
            Err(e) => warn!("[IMPORT] skipping piece {}: {e}", ext_piece.id),
        }
    }

    info!(
        "[IMPORT] imported {}/{} pieces from instance {:?}",
        pieces.len(),
        ext_instance.pieces.len(),
        ext_instance.name
    );

    Ok(Instance::new(ext_instance.name.clone(), pieces))
}

pub fn import_simple_polygon(sp: &ExtSPolygon) -> Result<SPolygon> {
    let points = sp.0.iter().map(|(x, y)| Point(*x, *y)).collect_vec();
    SPolygon::new(points)
}

use std::time::Instant;

use crate::entities::{Instance, NestSolution, PlacedPiece, Sheet};
use crate::geometry::primitives::Region;
use crate::io::ext_repr::{ExtPlacedPiece, ExtSPolygon, ExtSheet, ExtSolution};

/// Exports a solution out of the library
pub fn export(instance: &Instance, solution: &NestSolution, epoch: Instant) -> ExtSolution {
    ExtSolution {
        sheets: solution
            .sheets
            .iter()
            .map(|s| export_sheet(s, instance))
            .collect(),
        density: solution.density(),
        time_ms: solution
            .time_stamp
            .saturating_duration_since(epoch)
            .as_millis() as u64,
    }
}

pub fn export_sheet(sheet: &Sheet, instance: &Instance) -> ExtSheet {
    ExtSheet {
        index: sheet.id,
        width: sheet.width,
        height: sheet.height,
        unfilled_area: sheet.unfilled_area(),
        density: sheet.density(),
        placed_pieces: sheet
            .placed
            .iter()
            .map(|pp| export_placed_piece(pp, instance))
            .collect(),
    }
}

fn export_placed_piece(pp: &PlacedPiece, instance: &Instance) -> ExtPlacedPiece {
    ExtPlacedPiece {
        piece_id: instance.piece(pp.piece_id).ext_id,
        transformation: pp.d_transf.into(),
        shape: export_region(&pp.shape),
    }
}

/// Outer boundary of every part of the region, closing vertex excluded
pub fn export_region(region: &Region) -> Vec<ExtSPolygon> {
    region
        .parts()
        .iter()
        .map(|p| {
            let mut points = p.exterior_points().map(|pt| (pt.0, pt.1)).collect::<Vec<_>>();
            points.pop();
            ExtSPolygon(points)
        })
        .collect()
}

use anyhow::{Context, Result, ensure};
use geo::orient::Direction;
use geo::{BooleanOps, Orient};
use geo_types::MultiPolygon;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::primitives::Region;

/// Whether to strictly inflate or deflate when offsetting a shape.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeModifyMode {
    /// Modify the shape to be strictly larger than the original (superset).
    Inflate,
    /// Modify the shape to be strictly smaller than the original (subset).
    Deflate,
}

/// Turns an invalid region (self-crossing or otherwise degenerate boundaries) into a valid one
/// covering the same nominal area. A valid region is returned unchanged.
///
/// Self-crossing boundaries are resolved by an even-odd union, which splits them into their lobes.
/// Lobes thinner than [`SLIVER_AREA`](crate::geometry::primitives::SLIVER_AREA) are dropped.
/// Returns `None` if nothing valid remains.
pub fn repair(region: &Region) -> Option<Region> {
    if region.is_valid() {
        return Some(region.clone());
    }

    let resolved = region
        .to_multi_polygon()
        .union(&MultiPolygon::<f64>::new(vec![]));

    match Region::from_multi_polygon(resolved) {
        Some(repaired) if repaired.is_valid() => {
            debug!(
                "repaired region into {} part(s) with {} vertices",
                repaired.parts().len(),
                repaired.n_vertices()
            );
            Some(repaired)
        }
        Some(_) => {
            debug!("repair did not produce a valid region");
            None
        }
        None => {
            debug!("repair left an empty region");
            None
        }
    }
}

/// Offsets every boundary of `region` by `distance` along its normal, outward or inward depending on `mode`.
///
/// Deflating can split a part or make it vanish entirely, inflating can merge parts.
pub fn offset_region(region: &Region, mode: ShapeModifyMode, distance: f64) -> Result<Region> {
    ensure!(
        distance.is_finite() && distance >= 0.0,
        "offset distance must be finite and non-negative: {distance}"
    );
    let offset = match mode {
        ShapeModifyMode::Deflate => -distance,
        ShapeModifyMode::Inflate => distance,
    };

    let offset_mp = region
        .parts()
        .iter()
        .map(|p| {
            //the straight skeleton expects counterclockwise exteriors and clockwise holes
            let oriented = p.poly.orient(Direction::Default);
            geo_buffer::buffer_polygon(&oriented, offset)
        })
        .fold(MultiPolygon::<f64>::new(vec![]), |acc, mp| acc.union(&mp));

    let offset_region =
        Region::from_multi_polygon(offset_mp).context("offset eliminated the entire shape")?;
    ensure!(
        offset_region.is_valid(),
        "offset by {offset} produced an invalid shape"
    );

    Ok(offset_region)
}

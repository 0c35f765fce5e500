use geo::{Area, BooleanOps};
use geo_types::MultiPolygon;

use crate::geometry::primitives::Region;

/// Area covered by the union of `regions`, overlapping parts are only counted once.
pub fn union_area<'a>(regions: impl IntoIterator<Item = &'a Region>) -> f64 {
    regions
        .into_iter()
        .fold(MultiPolygon::<f64>::new(vec![]), |acc, r| {
            acc.union(&r.to_multi_polygon())
        })
        .unsigned_area()
}

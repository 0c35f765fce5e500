use std::slice;

use geo_types::MultiPolygon;
use itertools::Itertools;
use log::debug;
use ordered_float::OrderedFloat;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::{
    CollidesWith, DistanceTo, Shape, Transformable, TransformableFrom,
};
use crate::geometry::primitives::{Point, Rect, SLIVER_AREA, SPolygon};

/// A two-dimensional area: either one polygon or several disjoint ones.
/// Which variant a region is, is fixed when it is created.
/// Offsetting or repairing a single boundary can split it into multiple parts.
#[derive(Clone, Debug)]
pub enum Region {
    Single(SPolygon),
    Multi(Vec<SPolygon>),
}

impl Region {
    /// Builds a region out of a set of parts, `None` if `parts` is empty.
    pub fn from_parts(mut parts: Vec<SPolygon>) -> Option<Self> {
        match parts.len() {
            0 => None,
            1 => parts.pop().map(Region::Single),
            _ => Some(Region::Multi(parts)),
        }
    }

    /// Converts the output of a boolean or offset operation into a region.
    /// Parts which are too small to be meaningful are discarded.
    pub fn from_multi_polygon(mp: MultiPolygon<f64>) -> Option<Self> {
        let parts = mp
            .0
            .into_iter()
            .filter_map(|p| match SPolygon::from_geo(p) {
                Ok(sp) if sp.area > SLIVER_AREA => Some(sp),
                Ok(sp) => {
                    debug!("discarding sliver with area {:e}", sp.area);
                    None
                }
                Err(_) => None,
            })
            .collect_vec();
        Region::from_parts(parts)
    }

    pub fn to_multi_polygon(&self) -> MultiPolygon<f64> {
        MultiPolygon::new(self.parts().iter().map(|p| p.poly.clone()).collect())
    }

    pub fn parts(&self) -> &[SPolygon] {
        match self {
            Region::Single(p) => slice::from_ref(p),
            Region::Multi(ps) => ps,
        }
    }

    pub fn parts_mut(&mut self) -> &mut [SPolygon] {
        match self {
            Region::Single(p) => slice::from_mut(p),
            Region::Multi(ps) => ps,
        }
    }

    /// Every part is a valid polygon
    pub fn is_valid(&self) -> bool {
        self.parts().iter().all(|p| p.is_valid())
    }

    /// Whether the region lies entirely inside `rect`, boundary inclusive
    pub fn within(&self, rect: &Rect) -> bool {
        rect.almost_contains(&self.bbox())
    }

    /// Ordered vertices of the outer boundary of the first part, closing vertex included
    pub fn exterior_points(&self) -> Vec<Point> {
        self.parts()
            .first()
            .map(|p| p.exterior_points().collect())
            .unwrap_or_default()
    }

    pub fn n_vertices(&self) -> usize {
        self.parts().iter().map(|p| p.n_vertices()).sum()
    }
}

impl Shape for Region {
    fn centroid(&self) -> Point {
        match self {
            Region::Single(p) => p.centroid(),
            Region::Multi(ps) => {
                //area weighted average of the centroids of the parts
                let total_area = ps.iter().map(|p| p.area).sum::<f64>();
                let (sx, sy) = ps.iter().fold((0.0, 0.0), |(sx, sy), p| {
                    let Point(cx, cy) = p.centroid();
                    (sx + cx * p.area, sy + cy * p.area)
                });
                Point(sx / total_area, sy / total_area)
            }
        }
    }

    fn area(&self) -> f64 {
        self.parts().iter().map(|p| p.area).sum()
    }

    fn bbox(&self) -> Rect {
        match self {
            Region::Single(p) => p.bbox,
            Region::Multi(ps) => ps
                .iter()
                .map(|p| p.bbox)
                .reduce(Rect::bounding_rect)
                .expect("multi region has at least one part"),
        }
    }
}

impl CollidesWith<Region> for Region {
    fn collides_with(&self, other: &Region) -> bool {
        self.parts()
            .iter()
            .cartesian_product(other.parts())
            .any(|(a, b)| a.collides_with(b))
    }
}

impl DistanceTo<Region> for Region {
    fn distance_to(&self, other: &Region) -> f64 {
        self.parts()
            .iter()
            .cartesian_product(other.parts())
            .map(|(a, b)| OrderedFloat(a.distance_to(b)))
            .min()
            .map_or(f64::INFINITY, |d| d.0)
    }
}

impl Transformable for Region {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        self.parts_mut().iter_mut().for_each(|p| {
            p.transform(t);
        });
        self
    }
}

impl TransformableFrom for Region {
    fn transform_from(&mut self, reference: &Self, t: &Transformation) -> &mut Self {
        match (&mut *self, reference) {
            (Region::Single(p), Region::Single(r)) => {
                p.transform_from(r, t);
            }
            (Region::Multi(ps), Region::Multi(rs)) if ps.len() == rs.len() => {
                ps.iter_mut().zip(rs).for_each(|(p, r)| {
                    p.transform_from(r, t);
                });
            }
            (s, r) => *s = r.transform_clone(t),
        }
        self
    }
}

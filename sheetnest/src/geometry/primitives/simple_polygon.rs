use std::iter;

use anyhow::{Context, Result, ensure};
use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Area, Centroid, Distance, Euclidean, Intersects, MapCoordsInPlace};
use geo_types::{Coord, Line, LineString, Polygon};
use itertools::Itertools;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::{
    CollidesWith, DistanceTo, Shape, Transformable, TransformableFrom,
};
use crate::geometry::primitives::{Point, Rect, SLIVER_AREA};

/// Geometric primitive representing a polygon: one outer boundary and zero or more holes.
/// Holes only appear in polygons produced by boolean operations (see [`repair`](crate::geometry::shape_modification::repair)).
///
/// The bounding box and area are cached and kept up to date under every [`Transformation`].
#[derive(Clone, Debug)]
pub struct SPolygon {
    /// Underlying polygon, every ring is closed (first coordinate repeated at the end)
    pub poly: Polygon<f64>,
    pub bbox: Rect,
    pub area: f64,
}

impl SPolygon {
    /// Creates a polygon from an ordered list of boundary points.
    /// A repeated closing point and consecutive duplicates are dropped.
    /// The boundary may cross itself, such a polygon has to be [`repair`](crate::geometry::shape_modification::repair)ed before use.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let mut points = points.into_iter().dedup().collect_vec();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        ensure!(
            points.iter().all(|p| p.0.is_finite() && p.1.is_finite()),
            "polygon contains non-finite coordinates: {:?}",
            points
        );
        let n_distinct = points.iter().unique().count();
        ensure!(
            n_distinct >= 3,
            "polygon requires at least 3 distinct vertices, found {n_distinct}"
        );

        let exterior = LineString::from(points.into_iter().map(Coord::from).collect_vec());
        SPolygon::from_geo(Polygon::new(exterior, vec![]))
    }

    /// Wraps a [`geo_types::Polygon`], computing its bounding box and area.
    /// The polygon is not required to be valid, see [`SPolygon::is_valid`].
    pub fn from_geo(poly: Polygon<f64>) -> Result<Self> {
        let bbox = ring_bbox(poly.exterior()).context("polygon has an empty exterior")?;
        let area = poly.unsigned_area();

        Ok(SPolygon { poly, bbox, area })
    }

    /// Outer boundary, including the closing vertex
    pub fn exterior_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.poly.exterior().coords().map(|c| Point::from(*c))
    }

    /// Number of distinct vertices over all rings
    pub fn n_vertices(&self) -> usize {
        self.rings().map(|r| r.0.len().saturating_sub(1)).sum()
    }

    fn rings(&self) -> impl Iterator<Item = &LineString<f64>> {
        iter::once(self.poly.exterior()).chain(self.poly.interiors())
    }

    /// Checks whether the polygon is a valid region:
    /// every ring has at least 3 distinct vertices and a non-zero area,
    /// no two non-adjacent edges touch or cross and adjacent edges do not overlap.
    /// Different rings may only meet in isolated points.
    pub fn is_valid(&self) -> bool {
        if self.area.is_nan() || self.area <= SLIVER_AREA {
            return false;
        }
        let rings = self.rings().collect_vec();
        if !rings.iter().all(|r| ring_is_valid(r)) {
            return false;
        }

        let edges = rings
            .iter()
            .enumerate()
            .flat_map(|(r_idx, r)| r.lines().enumerate().map(move |(e_idx, l)| (r_idx, e_idx, l)))
            .collect_vec();

        let n_edges_in_ring = rings.iter().map(|r| r.lines().count()).collect_vec();

        for (i, &(r_i, e_i, l_i)) in edges.iter().enumerate() {
            for &(r_j, e_j, l_j) in &edges[i + 1..] {
                let intersection = line_intersection(l_i, l_j);
                let ok = match (r_i == r_j, intersection) {
                    (_, None) => true,
                    (_, Some(LineIntersection::Collinear { .. })) => false,
                    (true, Some(LineIntersection::SinglePoint { .. })) => {
                        edges_adjacent(e_i, e_j, n_edges_in_ring[r_i])
                    }
                    (false, Some(LineIntersection::SinglePoint { is_proper, .. })) => !is_proper,
                };
                if !ok {
                    return false;
                }
            }
        }
        true
    }

    fn refresh(&mut self) {
        if let Some(bbox) = ring_bbox(self.poly.exterior()) {
            self.bbox = bbox;
        }
        self.area = self.poly.unsigned_area();
    }
}

fn ring_bbox(ring: &LineString<f64>) -> Option<Rect> {
    Rect::enclosing(ring.coords().map(|c| Point::from(*c)))
}

fn ring_is_valid(ring: &LineString<f64>) -> bool {
    let distinct = ring.coords().map(|c| Point::from(*c)).unique().count();
    let no_zero_length_edges = ring.lines().all(|l| l.start != l.end);
    let signed_area = ring.lines().map(|l: Line<f64>| l.determinant()).sum::<f64>() / 2.0;
    distinct >= 3 && no_zero_length_edges && signed_area.abs() > SLIVER_AREA
}

fn edges_adjacent(i: usize, j: usize, n_edges: usize) -> bool {
    let (lo, hi) = (usize::min(i, j), usize::max(i, j));
    hi - lo == 1 || (lo == 0 && hi == n_edges - 1)
}

impl Shape for SPolygon {
    fn centroid(&self) -> Point {
        self.poly
            .centroid()
            .map(|c| Point(c.x(), c.y()))
            .unwrap_or_else(|| self.bbox.centroid())
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl CollidesWith<SPolygon> for SPolygon {
    fn collides_with(&self, other: &SPolygon) -> bool {
        self.bbox.collides_with(&other.bbox) && self.poly.intersects(&other.poly)
    }
}

impl DistanceTo<SPolygon> for SPolygon {
    fn distance_to(&self, other: &SPolygon) -> f64 {
        Euclidean::distance(&self.poly, &other.poly)
    }
}

impl Transformable for SPolygon {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        self.poly.map_coords_in_place(|c| {
            let (x, y) = t.apply((c.x, c.y));
            Coord { x, y }
        });
        self.refresh();
        self
    }
}

impl TransformableFrom for SPolygon {
    fn transform_from(&mut self, reference: &Self, t: &Transformation) -> &mut Self {
        let same_layout = self.poly.interiors().len() == reference.poly.interiors().len()
            && self
                .rings()
                .zip(reference.rings())
                .all(|(a, b)| a.0.len() == b.0.len());

        if !same_layout {
            *self = reference.transform_clone(t);
            return self;
        }

        let apply = |dst: &mut LineString<f64>, src: &LineString<f64>| {
            for (c, r) in dst.0.iter_mut().zip(src.0.iter()) {
                let (x, y) = t.apply((r.x, r.y));
                *c = Coord { x, y };
            }
        };

        self.poly
            .exterior_mut(|ext| apply(ext, reference.poly.exterior()));
        self.poly.interiors_mut(|ints| {
            for (ring, ref_ring) in ints.iter_mut().zip(reference.poly.interiors()) {
                apply(ring, ref_ring);
            }
        });
        self.refresh();
        self
    }
}

use anyhow::Result;
use anyhow::ensure;

use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Point;
use crate::util::FPA;

///Axis-aligned rectangle
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn try_new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self> {
        ensure!(
            x_min < x_max && y_min < y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Smallest rectangle containing all `points`, `None` for an empty iterator.
    /// Degenerate (zero width or height) results are allowed.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, Point(x, y)| {
            Some(match acc {
                None => Rect {
                    x_min: x,
                    y_min: y,
                    x_max: x,
                    y_max: y,
                },
                Some(r) => Rect {
                    x_min: r.x_min.min(x),
                    y_min: r.y_min.min(y),
                    x_max: r.x_max.max(x),
                    y_max: r.y_max.max(y),
                },
            })
        })
    }

    /// Smallest rectangle containing both `a` and `b`
    pub fn bounding_rect(a: Rect, b: Rect) -> Rect {
        Rect {
            x_min: a.x_min.min(b.x_min),
            y_min: a.y_min.min(b.y_min),
            x_max: a.x_max.max(b.x_max),
            y_max: a.y_max.max(b.y_max),
        }
    }

    /// Returns a new rectangle expanded by `d` in every direction.
    pub fn inflate(self, d: f64) -> Self {
        Rect {
            x_min: self.x_min - d,
            y_min: self.y_min - d,
            x_max: self.x_max + d,
            y_max: self.y_max + d,
        }
    }

    /// Whether `other` lies inside `self`, with a tolerance for floating point precision.
    /// Shared boundaries count as contained.
    pub fn almost_contains(&self, other: &Rect) -> bool {
        FPA(other.x_min) >= FPA(self.x_min)
            && FPA(other.y_min) >= FPA(self.y_min)
            && FPA(other.x_max) <= FPA(self.x_max)
            && FPA(other.y_max) <= FPA(self.y_max)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }
}

impl CollidesWith<Rect> for Rect {
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        f64::max(self.x_min, other.x_min) <= f64::min(self.x_max, other.x_max)
            && f64::max(self.y_min, other.y_min) <= f64::min(self.y_max, other.y_max)
    }
}

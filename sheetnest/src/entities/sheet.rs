use crate::entities::PlacedPiece;
use crate::geometry::primitives::{Rect, Region};
use crate::geometry::union::union_area;

/// A fixed-size rectangular output area, with its lower left corner at the origin.
/// Pieces are kept in the order in which they were accepted.
#[derive(Clone, Debug)]
pub struct Sheet {
    pub id: usize,
    pub width: f64,
    pub height: f64,
    pub placed: Vec<PlacedPiece>,
}

impl Sheet {
    pub fn new(id: usize, width: f64, height: f64) -> Self {
        Sheet {
            id,
            width,
            height,
            placed: vec![],
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: self.width,
            y_max: self.height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Geometries of all placed pieces, in acceptance order
    pub fn obstacles(&self) -> impl Iterator<Item = &Region> {
        self.placed.iter().map(|pp| &pp.shape)
    }

    /// Area covered by the placed pieces, overlaps counted once
    pub fn covered_area(&self) -> f64 {
        union_area(self.obstacles())
    }

    /// Sheet area minus the area covered by the placed pieces
    pub fn unfilled_area(&self) -> f64 {
        self.area() - self.covered_area()
    }

    /// Fraction of the sheet covered by placed pieces
    pub fn density(&self) -> f64 {
        self.covered_area() / self.area()
    }

    pub(crate) fn place(&mut self, placed_piece: PlacedPiece) {
        self.placed.push(placed_piece);
    }
}

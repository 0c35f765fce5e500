use serde::{Deserialize, Serialize};

use crate::geometry::DTransformation;

/// External representation of an [`Instance`](crate::entities::Instance).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtInstance {
    /// The name of the instance
    pub name: String,
    /// Set of pieces to be nested, each exactly once
    pub pieces: Vec<ExtPiece>,
}

/// External representation of a [`Piece`](crate::entities::Piece).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPiece {
    /// Unique identifier of the piece
    pub id: u64,
    /// Closed boundary of the piece, the closing point may be repeated
    pub shape: ExtSPolygon,
}

/// A polygon represented by the ordered points of its boundary
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSPolygon(pub Vec<(f64, f64)>);

/// External representation of a [`NestSolution`](crate::entities::NestSolution).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSolution {
    /// Sheets in the order they were opened
    pub sheets: Vec<ExtSheet>,
    /// Fraction of the total sheet area covered by pieces
    pub density: f64,
    /// Time elapsed between the start of the process and the creation of the solution
    pub time_ms: u64,
}

/// External representation of a [`Sheet`](crate::entities::Sheet).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSheet {
    pub index: usize,
    pub width: f64,
    pub height: f64,
    pub unfilled_area: f64,
    pub density: f64,
    /// Pieces in the order they were accepted
    pub placed_pieces: Vec<ExtPlacedPiece>,
}

/// External representation of a [`PlacedPiece`](crate::entities::PlacedPiece).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacedPiece {
    /// The id of the piece in the instance
    pub piece_id: u64,
    /// The transformation applied to the piece outline
    pub transformation: ExtTransformation,
    /// Outer boundaries of the geometry as placed on the sheet, one per part
    pub shape: Vec<ExtSPolygon>,
}

/// Represents a proper rigid transformation defined as a rotation followed by translation
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtTransformation {
    /// The rotation angle in degrees
    pub rotation: f64,
    /// The translation vector (x, y)
    pub translation: (f64, f64),
}

impl From<DTransformation> for ExtTransformation {
    fn from(dt: DTransformation) -> Self {
        ExtTransformation {
            rotation: dt.rotation(),
            translation: dt.translation(),
        }
    }
}

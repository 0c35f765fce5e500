use crate::geometry::DTransformation;
use crate::geometry::primitives::Region;

/// Represents a [`Piece`](crate::entities::Piece) that has been placed on a [`Sheet`](crate::entities::Sheet)
#[derive(Clone, Debug)]
pub struct PlacedPiece {
    pub piece_id: usize,
    /// Transformation that was applied to the piece outline to place it
    pub d_transf: DTransformation,
    /// The accepted geometry on the sheet
    pub shape: Region,
}

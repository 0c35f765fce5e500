use crate::geometry::primitives::Region;

/// A shape that has to be nested onto a sheet
#[derive(Clone, Debug)]
pub struct Piece {
    /// Index of the piece within its [`Instance`](crate::entities::Instance)
    pub id: usize,
    /// Identifier of the piece in the external representation
    pub ext_id: u64,
    /// Outline of the piece, as imported (and possibly rescaled)
    pub shape: Region,
}

impl Piece {
    pub fn new(id: usize, ext_id: u64, shape: Region) -> Self {
        Piece { id, ext_id, shape }
    }
}

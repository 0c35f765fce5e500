use crate::entities::Piece;
use crate::util::assertions::instance_piece_ids_correct;

#[derive(Debug, Clone)]
/// A nesting problem instance: a set of pieces, each to be placed exactly once.
pub struct Instance {
    pub name: String,
    pub pieces: Vec<Piece>,
}

impl Instance {
    pub fn new(name: String, pieces: Vec<Piece>) -> Self {
        assert!(instance_piece_ids_correct(&pieces));

        Self { name, pieces }
    }

    pub fn piece(&self, id: usize) -> &Piece {
        &self.pieces[id]
    }

    pub fn n_pieces(&self) -> usize {
        self.pieces.len()
    }
}

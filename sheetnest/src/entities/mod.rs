mod instance;
mod piece;
mod placed_piece;
mod problem;
mod sheet;
mod solution;

/// Uniform rescaling of pieces, applied before packing starts
pub mod scaling;

#[doc(inline)]
pub use instance::Instance;

#[doc(inline)]
pub use piece::Piece;

#[doc(inline)]
pub use placed_piece::PlacedPiece;

#[doc(inline)]
pub use problem::NestProblem;

#[doc(inline)]
pub use problem::PieceState;

#[doc(inline)]
pub use problem::Placement;

#[doc(inline)]
pub use problem::SheetSlot;

#[doc(inline)]
pub use sheet::Sheet;

#[doc(inline)]
pub use solution::NestSolution;

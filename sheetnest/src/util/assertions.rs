use itertools::Itertools;
use log::error;

use crate::entities::{NestProblem, NestSolution, Piece, PieceState, Sheet};
use crate::geometry::geo_traits::DistanceTo;
use crate::util::FPA;

pub fn instance_piece_ids_correct(pieces: &[Piece]) -> bool {
    pieces.iter().enumerate().all(|(i, piece)| piece.id == i)
}

/// Checks whether every placed piece lies within the sheet
/// and every pair of placed pieces is at least `clearance` apart.
pub fn sheet_is_feasible(sheet: &Sheet, clearance: f64) -> bool {
    let rect = sheet.rect();
    for pp in sheet.placed.iter() {
        if !pp.shape.within(&rect) {
            error!(
                "piece {} on sheet {} is not within the sheet",
                pp.piece_id, sheet.id
            );
            return false;
        }
    }

    for (a, b) in sheet.placed.iter().tuple_combinations() {
        let d = a.shape.distance_to(&b.shape);
        if FPA(d) < FPA(clearance) {
            error!(
                "pieces {} and {} on sheet {} are {d} apart, clearance is {clearance}",
                a.piece_id, b.piece_id, sheet.id
            );
            return false;
        }
    }
    true
}

pub fn problem_matches_solution(problem: &NestProblem, solution: &NestSolution) -> bool {
    let NestSolution {
        sheets,
        piece_states,
        time_stamp: _,
    } = solution;

    assert_eq!(problem.sheets.len(), sheets.len());
    assert_eq!(&problem.piece_states, piece_states);

    //every placed piece should be found on the sheet its state refers to
    piece_states
        .iter()
        .enumerate()
        .all(|(piece_id, state)| match state {
            PieceState::Unplaced => sheets
                .iter()
                .all(|s| s.placed.iter().all(|pp| pp.piece_id != piece_id)),
            PieceState::Placed { sheet_idx, d_transf } => sheets[*sheet_idx]
                .placed
                .iter()
                .any(|pp| pp.piece_id == piece_id && pp.d_transf == *d_transf),
        })
}

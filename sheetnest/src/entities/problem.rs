use std::time::Instant;

use anyhow::{Result, ensure};

use crate::entities::{Instance, NestSolution, PlacedPiece, Sheet};
use crate::geometry::DTransformation;
use crate::geometry::primitives::Region;
use crate::util::assertions::problem_matches_solution;

/// Dynamic counterpart of [`Instance`]: the sheets opened so far and the placement state of every piece.
///
/// Sheets are only ever appended and every piece is placed at most once.
#[derive(Clone, Debug)]
pub struct NestProblem {
    pub instance: Instance,
    pub sheet_width: f64,
    pub sheet_height: f64,
    pub sheets: Vec<Sheet>,
    pub piece_states: Vec<PieceState>,
}

impl NestProblem {
    /// Creates a problem with a single empty sheet and all pieces unplaced.
    pub fn new(instance: Instance, sheet_width: f64, sheet_height: f64) -> Result<Self> {
        ensure!(
            sheet_width > 0.0 && sheet_height > 0.0,
            "sheet dimensions must be positive, width: {sheet_width}, height: {sheet_height}"
        );
        let piece_states = vec![PieceState::Unplaced; instance.n_pieces()];

        Ok(Self {
            instance,
            sheet_width,
            sheet_height,
            sheets: vec![Sheet::new(0, sheet_width, sheet_height)],
            piece_states,
        })
    }

    /// Places a piece according to the provided [`Placement`], opening a new sheet if requested.
    /// Returns the index of the sheet the piece was placed on.
    pub fn place_piece(&mut self, placement: Placement) -> usize {
        let Placement {
            slot,
            piece_id,
            d_transf,
            shape,
        } = placement;
        assert!(
            !self.is_placed(piece_id),
            "piece {piece_id} is already placed"
        );

        let sheet_idx = match slot {
            SheetSlot::Existing(idx) => idx,
            SheetSlot::New => self.open_sheet(),
        };

        self.sheets[sheet_idx].place(PlacedPiece {
            piece_id,
            d_transf,
            shape,
        });
        self.piece_states[piece_id] = PieceState::Placed {
            sheet_idx,
            d_transf,
        };

        sheet_idx
    }

    pub fn is_placed(&self, piece_id: usize) -> bool {
        matches!(self.piece_states[piece_id], PieceState::Placed { .. })
    }

    pub fn n_placed(&self) -> usize {
        self.piece_states
            .iter()
            .filter(|s| matches!(s, PieceState::Placed { .. }))
            .count()
    }

    /// Index of the most recently opened sheet
    pub fn latest_sheet_idx(&self) -> usize {
        self.sheets.len() - 1
    }

    /// Creates a snapshot of the current state of the problem as a [`NestSolution`].
    pub fn save(&self) -> NestSolution {
        let solution = NestSolution {
            sheets: self.sheets.clone(),
            piece_states: self.piece_states.clone(),
            time_stamp: Instant::now(),
        };

        debug_assert!(problem_matches_solution(self, &solution));

        solution
    }

    fn open_sheet(&mut self) -> usize {
        let idx = self.sheets.len();
        self.sheets
            .push(Sheet::new(idx, self.sheet_width, self.sheet_height));
        idx
    }
}

/// Placement state of a single piece
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PieceState {
    Unplaced,
    Placed {
        sheet_idx: usize,
        d_transf: DTransformation,
    },
}

/// Enum to distinguish between existing [`Sheet`]s and one that still has to be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSlot {
    /// An existing sheet, identified by its index
    Existing(usize),
    /// A sheet that does not yet exist, it is opened when the placement is executed
    New,
}

#[derive(Clone, Debug)]
/// Encapsulates all required information to place a [`Piece`](crate::entities::Piece) in a [`NestProblem`].
pub struct Placement {
    /// Which sheet to place the piece on
    pub slot: SheetSlot,
    /// The id of the piece to be placed
    pub piece_id: usize,
    /// The transformation that was applied to the piece
    pub d_transf: DTransformation,
    /// The geometry of the piece as it lies on the sheet
    pub shape: Region,
}

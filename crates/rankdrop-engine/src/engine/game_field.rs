use crate::{
    BoardError, CompletePieceDropError, PlaceError,
    core::{
        bit_board::Board,
        game_board::GamePiece as _,
        piece::{Piece, PieceKind},
    },
};

use super::piece_buffer::{PieceBuffer, PieceSeed};

/// Board plus the piece currently falling and the queue behind it.
///
/// There is no gravity or input handling: the player picks an orientation and
/// a column, and [`complete_piece_drop`](Self::complete_piece_drop) drops it
/// straight down, locks it and clears full rows.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling_piece: Piece,
    piece_buffer: PieceBuffer,
}

impl GameField {
    /// Creates an empty field with a randomly seeded piece sequence.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        Self::with_piece_buffer(width, height, PieceBuffer::new())
    }

    pub fn with_seed(width: usize, height: usize, seed: PieceSeed) -> Result<Self, BoardError> {
        Self::with_piece_buffer(width, height, PieceBuffer::with_seed(seed))
    }

    fn with_piece_buffer(
        width: usize,
        height: usize,
        mut piece_buffer: PieceBuffer,
    ) -> Result<Self, BoardError> {
        let board = Board::new(width, height)?;
        let falling_piece = Piece::new(piece_buffer.pop_next());
        Ok(Self {
            board,
            falling_piece,
            piece_buffer,
        })
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for brains that simulate placements.
    ///
    /// Callers must leave the board as they found it.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The piece to place next, in its spawn orientation.
    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.piece_buffer.next_pieces()
    }

    /// Drops `piece` straight down at `column`, locks it and clears full rows.
    ///
    /// `piece` is normally a rotation of [`falling_piece`](Self::falling_piece).
    /// Returns the number of cleared rows together with the outcome; the next
    /// piece is drawn only when the drop succeeds. The game is over when the
    /// piece cannot be placed or the stack ends above the visible board.
    pub fn complete_piece_drop(
        &mut self,
        piece: &Piece,
        column: usize,
    ) -> (usize, Result<(), CompletePieceDropError>) {
        if column + piece.width() > self.board.width() {
            let err = PlaceError::OutOfBounds { x: column, y: 0 };
            return (0, Err(CompletePieceDropError::Place(err)));
        }

        let row = self.board.row_after_drop(piece, column);
        if let Err(err) = self.board.place(piece, column, row) {
            return (0, Err(CompletePieceDropError::Place(err)));
        }
        let cleared_rows = self.board.clear_rows();

        if self.board.largest_height() > self.board.height() {
            return (cleared_rows, Err(CompletePieceDropError::TopOut));
        }

        self.falling_piece = Piece::new(self.piece_buffer.pop_next());
        (cleared_rows, Ok(()))
    }
}

//! Board and piece collaborators for the rankdrop move selector.
//!
//! The evaluator only talks to the grid and the falling piece through the
//! [`GameBoard`] and [`GamePiece`] traits. This crate defines those traits and
//! ships a reference implementation of both:
//!
//! - [`Board`] - fixed-width grid stored as bit rows, with single-level `undo`
//! - [`Piece`] / [`PieceKind`] - the seven tetrominoes and their rotations
//! - [`Move`] - the decision handed back by a brain
//! - [`GameField`], [`GameStats`], [`PieceBuffer`] - a headless game loop
//!
//! # Coordinates
//!
//! `x` counts columns from the left edge, `y` counts rows from the floor.
//! Row 0 is the bottom row.
//!
//! # Example
//!
//! ```
//! use rankdrop_engine::{Board, Piece, PieceKind};
//!
//! let mut board = Board::from_ascii(20, "####.#####").unwrap();
//! let stick = Piece::new(PieceKind::I);
//! let row = board.row_after_drop(&stick, 4);
//! assert_eq!(row, 0);
//!
//! board.place(&stick, 4, row).unwrap();
//! assert_eq!(board.column_height(4), 4);
//! board.undo();
//! assert_eq!(board.column_height(4), 0);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Errors raised while building a [`Board`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("board width must be between 1 and 64, got {width}")]
    InvalidWidth { width: usize },
    #[display("board height must be at least 1")]
    InvalidHeight,
    #[display("board art is empty")]
    EmptyArt,
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("unexpected character {ch:?} in row {row}")]
    InvalidCell { row: usize, ch: char },
    #[display("board art has {rows} rows but the board is only {height} rows tall")]
    TooManyRows { rows: usize, height: usize },
}

/// Errors raised by [`Board::place`].
///
/// A failed placement leaves the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlaceError {
    #[display("piece at ({x}, {y}) extends outside the board")]
    OutOfBounds { x: usize, y: usize },
    #[display("piece at ({x}, {y}) overlaps occupied cells")]
    Collision { x: usize, y: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CompletePieceDropError {
    #[display("failed to lock piece: {_0}")]
    Place(PlaceError),
    #[display("stack rose above the visible board")]
    TopOut,
}

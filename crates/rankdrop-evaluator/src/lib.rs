//! Rank-based move selection for Tetris-like games.
//!
//! Given a board and the falling piece, the evaluator tries every rotation in
//! every column, measures what each placement does to the board and picks the
//! cheapest one. Scores are built from *ranks* rather than raw values: a
//! placement that creates two holes is not judged by the number two, but by how
//! many other candidates did better.
//!
//! # Pipeline
//!
//! ```text
//! survey (pre-move holes and heights)
//!     ↓
//! simulate (place, measure, undo for every rotation × column)
//!     ↓
//! rank (new holes, old holes, caves, height change)
//!     ↓
//! score (weighted rank fractions + rows cleared, height-limit override)
//!     ↓
//! select (first minimum)
//! ```
//!
//! - [`survey`] - [`PreMoveSnapshot`] of per-column holes and heights
//! - [`simulator`] - [`for_each_placement`] with place/undo bracketing
//! - [`metrics`] - the per-placement measurements
//! - [`ranking`] - dense ranks over all candidates
//! - [`scoring`] - weighted score and argmin selection
//! - [`evaluation`] - the full pipeline in one call
//! - [`brain`] - the [`Brain`] strategy trait and its implementations
//! - [`session`] - a headless game driven by a brain
//!
//! # Example
//!
//! ```
//! use rankdrop_engine::{Board, Piece, PieceKind};
//! use rankdrop_evaluator::{Brain as _, RankingBrain};
//!
//! let mut board = Board::from_ascii(12, "####.#####").unwrap();
//! let before = board.clone();
//!
//! let brain = RankingBrain::default();
//! let mv = brain.best_move(&mut board, &Piece::new(PieceKind::I), 8).unwrap();
//!
//! assert_eq!((mv.column(), mv.row()), (4, 0));
//! assert_eq!(board, before);
//! ```

use rankdrop_engine::PlaceError;

pub use self::{
    brain::*, evaluation::*, metrics::*, ranking::*, scoring::*, session::*, simulator::*,
    survey::*, weights::*,
};

pub mod brain;
pub mod evaluation;
pub mod metrics;
pub mod ranking;
pub mod scoring;
pub mod session;
pub mod simulator;
pub mod survey;
pub mod weights;

/// Reasons a move cannot be chosen.
///
/// The board is left as it was in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EvaluateError {
    #[display("board has no columns")]
    EmptyBoard,
    #[display("piece has no rotations")]
    NoRotations,
    #[display("piece has an orientation without columns")]
    DegeneratePiece,
    #[display("no orientation of the piece fits a board {board_width} columns wide")]
    PieceTooWide { board_width: usize },
    #[display("failed to place piece: {_0}")]
    Place(PlaceError),
}

/// Widens a board dimension for signed arithmetic.
pub(crate) fn signed(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

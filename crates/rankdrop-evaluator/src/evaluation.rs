//! One complete decision: survey, simulate, rank, score and select.

use rankdrop_engine::{GameBoard, GamePiece, Move};
use serde::Serialize;

use crate::{
    EvaluateError,
    metrics::PlacementMetrics,
    ranking::rank_all,
    scoring::{score_all, select_best},
    simulator::{PlacementIndex, simulate},
    survey::PreMoveSnapshot,
    weights::Weights,
};

/// Result of evaluating every placement of a piece.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation<P> {
    snapshot: PreMoveSnapshot,
    placements: Vec<PlacementMetrics>,
    index: PlacementIndex,
    best_index: usize,
    best_move: Move<P>,
}

impl<P> Evaluation<P> {
    #[must_use]
    pub fn snapshot(&self) -> &PreMoveSnapshot {
        &self.snapshot
    }

    /// All candidates in flat-index order, ranked and scored.
    #[must_use]
    pub fn placements(&self) -> &[PlacementMetrics] {
        &self.placements
    }

    #[must_use]
    pub fn index(&self) -> &PlacementIndex {
        &self.index
    }

    /// Flat index of the chosen placement.
    #[must_use]
    pub fn best_index(&self) -> usize {
        self.best_index
    }

    #[must_use]
    pub fn best_move(&self) -> &Move<P> {
        &self.best_move
    }

    #[must_use]
    pub fn into_best_move(self) -> Move<P> {
        self.best_move
    }
}

/// Evaluates every rotation of `piece` in every column and picks the cheapest.
///
/// The board is mutated during the call and restored before it returns, on
/// success and on error alike.
pub fn evaluate<B>(
    board: &mut B,
    piece: &B::Piece,
    height_limit: usize,
    weights: &Weights,
) -> Result<Evaluation<B::Piece>, EvaluateError>
where
    B: GameBoard + ?Sized,
{
    let board_width = board.width();
    check_preconditions(board_width, piece)?;

    let snapshot = PreMoveSnapshot::survey(board);
    let (mut placements, index) = simulate(board, piece, &snapshot)?;
    rank_all(&mut placements);
    score_all(&mut placements, weights, height_limit);

    let (best_index, (rotation, column)) = select_best(&placements)
        .and_then(|i| Some((i, index.decode(i)?)))
        .ok_or(EvaluateError::PieceTooWide { board_width })?;
    let best = &placements[best_index];
    log::debug!(
        "chose rotation {rotation} column {column} out of {} placements (score {:.3}, rows cleared {}, max height {})",
        placements.len(),
        best.score,
        best.rows_cleared,
        best.max_height_after,
    );

    let best_move = Move::new(piece.nth_rotation(rotation), column, best.placement.row)
        .with_score(best.score);
    Ok(Evaluation {
        snapshot,
        placements,
        index,
        best_index,
        best_move,
    })
}

pub(crate) fn check_preconditions<P>(board_width: usize, piece: &P) -> Result<(), EvaluateError>
where
    P: GamePiece,
{
    if board_width == 0 {
        return Err(EvaluateError::EmptyBoard);
    }
    let num_rotations = piece.num_rotations();
    if num_rotations == 0 {
        return Err(EvaluateError::NoRotations);
    }
    if (0..num_rotations).any(|r| piece.nth_rotation(r).width() == 0) {
        return Err(EvaluateError::DegeneratePiece);
    }
    Ok(())
}

//! Move-selection strategies.
//!
//! A [`Brain`] looks at a board and the falling piece and answers with a
//! [`Move`]. It may place and undo pieces while thinking, but hands the board
//! back unchanged.

use std::fmt;

use rankdrop_engine::{GameBoard, GamePiece as _, Move};

use crate::{
    EvaluateError,
    evaluation::{check_preconditions, evaluate},
    weights::Weights,
};

pub trait Brain<B>: fmt::Debug
where
    B: GameBoard + ?Sized,
{
    /// Chooses where to drop `piece`.
    ///
    /// `height_limit` is the stack height the brain should stay below.
    fn best_move(
        &self,
        board: &mut B,
        piece: &B::Piece,
        height_limit: usize,
    ) -> Result<Move<B::Piece>, EvaluateError>;
}

/// Picks the placement with the best weighted rank score.
///
/// See [`evaluate`] for the full pipeline.
#[derive(Debug, Clone, Default)]
pub struct RankingBrain {
    weights: Weights,
}

impl RankingBrain {
    #[must_use]
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &Weights {
        &self.weights
    }
}

impl<B> Brain<B> for RankingBrain
where
    B: GameBoard + ?Sized,
{
    fn best_move(
        &self,
        board: &mut B,
        piece: &B::Piece,
        height_limit: usize,
    ) -> Result<Move<B::Piece>, EvaluateError> {
        let evaluation = evaluate(board, piece, height_limit, &self.weights)?;
        Ok(evaluation.into_best_move())
    }
}

/// Drops the piece unrotated in the middle of the board.
///
/// The move always reports row 0 and a fixed score of [`CenterBrain::SCORE`];
/// the caller is expected to drop the piece to its resting row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterBrain;

impl CenterBrain {
    pub const SCORE: f64 = 100_000.0;
}

impl<B> Brain<B> for CenterBrain
where
    B: GameBoard + ?Sized,
{
    fn best_move(
        &self,
        board: &mut B,
        piece: &B::Piece,
        _height_limit: usize,
    ) -> Result<Move<B::Piece>, EvaluateError> {
        let board_width = board.width();
        check_preconditions(board_width, piece)?;
        let free = board_width
            .checked_sub(piece.width())
            .ok_or(EvaluateError::PieceTooWide { board_width })?;
        Ok(Move::new(piece.clone(), free / 2, 0).with_score(Self::SCORE))
    }
}

#[cfg(test)]
mod tests {
    use rankdrop_engine::{Board, Piece, PieceKind};

    use super::*;

    #[test]
    fn test_center_brain_fixed_decision() {
        let mut board = Board::from_ascii(20, "#########.").unwrap();
        let before = board.clone();

        let square = Piece::new(PieceKind::O);
        let mv = CenterBrain.best_move(&mut board, &square, 16).unwrap();
        assert_eq!(mv.piece(), &square);
        assert_eq!((mv.column(), mv.row()), (4, 0));
        assert_eq!(mv.score(), Some(CenterBrain::SCORE));

        let t = Piece::new(PieceKind::T);
        let mv = CenterBrain.best_move(&mut board, &t, 16).unwrap();
        assert_eq!(mv.column(), 3);
        assert_eq!(board, before);
    }

    #[test]
    fn test_center_brain_keeps_given_rotation() {
        let mut board = Board::new(10, 20).unwrap();
        let flat = Piece::with_rotation(PieceKind::I, 1);
        let mv = CenterBrain.best_move(&mut board, &flat, 16).unwrap();
        assert_eq!(mv.piece(), &flat);
        assert_eq!(mv.column(), 3);
    }

    #[test]
    fn test_center_brain_rejects_wide_piece() {
        let mut board = Board::new(3, 20).unwrap();
        let flat = Piece::with_rotation(PieceKind::I, 1);
        assert_eq!(
            CenterBrain.best_move(&mut board, &flat, 16),
            Err(EvaluateError::PieceTooWide { board_width: 3 })
        );
    }

    #[test]
    fn test_ranking_brain_uses_weights() {
        let mut board = Board::from_ascii(20, "####.#####").unwrap();
        let stick = Piece::new(PieceKind::I);

        let default_move = RankingBrain::default()
            .best_move(&mut board, &stick, 16)
            .unwrap();
        assert_eq!(default_move.column(), 4);

        // Rewarding cleared rows instead of penalising them avoids the well.
        let reckless = RankingBrain::new(Weights {
            rows_cleared: 50.0,
            ..Weights::DEFAULT
        });
        let mv = reckless.best_move(&mut board, &stick, 16).unwrap();
        assert_ne!((mv.piece().rotation(), mv.column()), (0, 4));
        assert_eq!(reckless.weights().rows_cleared, 50.0);
    }

    #[test]
    fn test_brains_behind_trait_objects() {
        let brains: [Box<dyn Brain<Board>>; 2] =
            [Box::new(RankingBrain::default()), Box::new(CenterBrain)];
        let mut board = Board::new(10, 20).unwrap();
        let piece = Piece::new(PieceKind::L);
        for brain in &brains {
            let mv = brain.best_move(&mut board, &piece, 16).unwrap();
            assert_eq!(mv.piece().kind(), PieceKind::L);
            assert_eq!(board.largest_height(), 0);
        }
    }
}

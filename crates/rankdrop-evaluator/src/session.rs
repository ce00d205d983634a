//! Headless games played by a brain.

use rankdrop_engine::{Board, CompletePieceDropError, GameField, GameStats};
use serde::Serialize;

use crate::brain::Brain;

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum SessionEnd {
    /// The requested number of pieces was placed.
    #[display("piece limit reached")]
    PieceLimit,
    /// The stack rose above the visible board or a piece could not be placed.
    #[display("topped out")]
    TopOut,
    /// The brain could not choose a move.
    #[display("no move available")]
    NoMove,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub stats: GameStats,
    pub end: SessionEnd,
}

/// Lets `brain` play on `field` until it tops out or has placed `max_pieces` pieces.
pub fn play_session(
    brain: &dyn Brain<Board>,
    field: &mut GameField,
    height_limit: usize,
    max_pieces: usize,
) -> SessionOutcome {
    let mut stats = GameStats::new();

    let end = loop {
        if stats.completed_pieces() >= max_pieces {
            break SessionEnd::PieceLimit;
        }

        let piece = *field.falling_piece();
        let mv = match brain.best_move(field.board_mut(), &piece, height_limit) {
            Ok(mv) => mv,
            Err(err) => {
                log::warn!("{brain:?} found no move for {}: {err}", piece.kind());
                break SessionEnd::NoMove;
            }
        };

        let (cleared_rows, result) = field.complete_piece_drop(mv.piece(), mv.column());
        match result {
            Ok(()) => stats.complete_piece_drop(cleared_rows),
            Err(CompletePieceDropError::TopOut) => {
                stats.complete_piece_drop(cleared_rows);
                break SessionEnd::TopOut;
            }
            Err(err @ CompletePieceDropError::Place(_)) => {
                log::debug!("game over: {err}");
                break SessionEnd::TopOut;
            }
        }
        if cleared_rows > 0 {
            log::trace!("cleared {cleared_rows} rows");
        }
    };

    log::debug!(
        "session ended ({end}) after {} pieces, {} rows cleared",
        stats.completed_pieces(),
        stats.total_cleared_rows(),
    );
    SessionOutcome { stats, end }
}

#[cfg(test)]
mod tests {
    use rankdrop_engine::PieceSeed;

    use super::*;
    use crate::brain::{CenterBrain, RankingBrain};

    fn seed() -> PieceSeed {
        "5eed5eed5eed5eed5eed5eed5eed5eed".parse().unwrap()
    }

    #[test]
    fn test_center_brain_tops_out() {
        let mut field = GameField::with_seed(10, 20, seed()).unwrap();
        let outcome = play_session(&CenterBrain, &mut field, 16, 1000);
        assert_eq!(outcome.end, SessionEnd::TopOut);
        // Every piece covers column 4 and the outer columns stay empty.
        assert!(outcome.stats.completed_pieces() <= 21);
        assert_eq!(outcome.stats.total_cleared_rows(), 0);
    }

    #[test]
    fn test_ranking_brain_survives() {
        let mut field = GameField::with_seed(10, 20, seed()).unwrap();
        let outcome = play_session(&RankingBrain::default(), &mut field, 16, 30);
        assert_eq!(outcome.end, SessionEnd::PieceLimit);
        assert_eq!(outcome.stats.completed_pieces(), 30);
        assert!(outcome.stats.total_cleared_rows() > 0);
        assert!(field.board().largest_height() <= 16);
    }

    #[test]
    fn test_zero_piece_limit() {
        let mut field = GameField::with_seed(10, 20, seed()).unwrap();
        let outcome = play_session(&CenterBrain, &mut field, 16, 0);
        assert_eq!(outcome.end, SessionEnd::PieceLimit);
        assert_eq!(outcome.stats.completed_pieces(), 0);
    }

    #[test]
    fn test_narrow_board_has_no_move() {
        // Only the vertical stick fits a single column; every other kind stops the game.
        let mut field = GameField::with_seed(1, 20, seed()).unwrap();
        let outcome = play_session(&RankingBrain::default(), &mut field, 16, 100);
        assert_eq!(outcome.end, SessionEnd::NoMove);
    }

    #[test]
    fn test_outcome_serializes() {
        let outcome = SessionOutcome {
            stats: GameStats::new(),
            end: SessionEnd::PieceLimit,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["end"], "piece-limit");
        assert_eq!(json["stats"]["score"], 0);
    }
}

//! Pre-move survey of the board.

use rankdrop_engine::GameBoard;
use serde::Serialize;

/// Holes and heights of every column, captured once before any placement.
///
/// A hole is an empty cell below the top of its column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreMoveSnapshot {
    holes_per_column: Vec<usize>,
    height_per_column: Vec<usize>,
}

impl PreMoveSnapshot {
    #[must_use]
    pub fn survey<B>(board: &B) -> Self
    where
        B: GameBoard + ?Sized,
    {
        let width = board.width();
        Self {
            holes_per_column: (0..width).map(|x| column_holes(board, x)).collect(),
            height_per_column: (0..width).map(|x| board.column_height(x)).collect(),
        }
    }

    #[must_use]
    pub fn holes_per_column(&self) -> &[usize] {
        &self.holes_per_column
    }

    #[must_use]
    pub fn height_per_column(&self) -> &[usize] {
        &self.height_per_column
    }

    /// Height of the tallest column before the move.
    #[must_use]
    pub fn max_height(&self) -> usize {
        self.height_per_column.iter().copied().max().unwrap_or(0)
    }
}

/// Counts empty cells below the height of column `x`.
#[must_use]
pub fn column_holes<B>(board: &B, x: usize) -> usize
where
    B: GameBoard + ?Sized,
{
    (0..board.column_height(x))
        .filter(|&y| !board.has_block_at(x, y))
        .count()
}

#[cfg(test)]
mod tests {
    use rankdrop_engine::Board;

    use super::*;

    #[test]
    fn test_survey_counts_covered_cells() {
        let board = Board::from_ascii(
            20,
            r"
            ....#.....
            ####.#####
            ",
        )
        .unwrap();
        let snapshot = PreMoveSnapshot::survey(&board);
        assert_eq!(snapshot.holes_per_column(), &[0, 0, 0, 0, 1, 0, 0, 0, 0, 0]);
        assert_eq!(snapshot.height_per_column(), &[1, 1, 1, 1, 2, 1, 1, 1, 1, 1]);
        assert_eq!(snapshot.max_height(), 2);
    }

    #[test]
    fn test_survey_heights() {
        let board = Board::from_ascii(
            20,
            r"
            ....##....
            ####..####
            ",
        )
        .unwrap();
        let snapshot = PreMoveSnapshot::survey(&board);
        assert_eq!(snapshot.height_per_column(), &[1, 1, 1, 1, 2, 2, 1, 1, 1, 1]);
        assert_eq!(snapshot.holes_per_column(), &[0, 0, 0, 0, 1, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_stacked_holes() {
        let board = Board::from_ascii(
            20,
            r"
            #.
            ..
            #.
            ..
            ",
        )
        .unwrap();
        assert_eq!(column_holes(&board, 0), 2);
        assert_eq!(column_holes(&board, 1), 0);
    }

    #[test]
    fn test_empty_board() {
        let board = Board::new(6, 10).unwrap();
        let snapshot = PreMoveSnapshot::survey(&board);
        assert_eq!(snapshot.holes_per_column(), &[0; 6]);
        assert_eq!(snapshot.max_height(), 0);
    }
}

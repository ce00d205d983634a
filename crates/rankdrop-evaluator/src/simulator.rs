//! Trial placements with guaranteed undo.
//!
//! [`for_each_placement`] drops the piece in every rotation and column, hands
//! the mutated board to a callback and takes the piece back before moving on.
//! The take-back lives in [`PlacementGuard`]'s `Drop`, so the board is restored
//! on early returns and while unwinding as well.

use std::ops::Deref;

use rankdrop_engine::{GameBoard, GamePiece, PlaceError};
use serde::Serialize;

use crate::{
    EvaluateError,
    metrics::{Placement, PlacementMetrics},
    survey::PreMoveSnapshot,
};

/// A piece placed on a board for as long as the guard lives.
///
/// Dereferences to the board so metrics can be read while the piece is in place.
#[derive(Debug)]
pub struct PlacementGuard<'a, B>
where
    B: GameBoard + ?Sized,
{
    board: &'a mut B,
}

impl<'a, B> PlacementGuard<'a, B>
where
    B: GameBoard + ?Sized,
{
    /// Places `piece` at `(column, row)`, or leaves the board untouched on error.
    pub fn place(
        board: &'a mut B,
        piece: &B::Piece,
        column: usize,
        row: usize,
    ) -> Result<Self, PlaceError> {
        board.place(piece, column, row)?;
        Ok(Self { board })
    }
}

impl<B> Deref for PlacementGuard<'_, B>
where
    B: GameBoard + ?Sized,
{
    type Target = B;

    fn deref(&self) -> &B {
        self.board
    }
}

impl<B> Drop for PlacementGuard<'_, B>
where
    B: GameBoard + ?Sized,
{
    fn drop(&mut self) {
        self.board.undo();
    }
}

/// Flat-index range occupied by one rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacementSpan {
    pub start: usize,
    pub count: usize,
}

/// Maps flat placement indices back to `(rotation, column)`.
///
/// Placements are numbered rotation by rotation, left to right. A rotation that
/// does not fit the board has an empty span.
///
/// ```
/// use rankdrop_evaluator::PlacementIndex;
///
/// let mut index = PlacementIndex::default();
/// index.push_rotation(7);
/// index.push_rotation(0);
/// index.push_rotation(9);
///
/// assert_eq!(index.len(), 16);
/// assert_eq!(index.decode(6), Some((0, 6)));
/// assert_eq!(index.decode(7), Some((2, 0)));
/// assert_eq!(index.decode(16), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlacementIndex {
    spans: Vec<PlacementSpan>,
}

impl PlacementIndex {
    /// Appends the span of the next rotation, `count` placements long.
    pub fn push_rotation(&mut self, count: usize) {
        let start = self.len();
        self.spans.push(PlacementSpan { start, count });
    }

    /// Total number of placements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.last().map_or(0, |span| span.start + span.count)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spans indexed by rotation.
    #[must_use]
    pub fn spans(&self) -> &[PlacementSpan] {
        &self.spans
    }

    /// Decodes a flat index into `(rotation, column)`.
    #[must_use]
    pub fn decode(&self, index: usize) -> Option<(usize, usize)> {
        self.spans
            .iter()
            .enumerate()
            .find(|(_, span)| (span.start..span.start + span.count).contains(&index))
            .map(|(rotation, span)| (rotation, index - span.start))
    }
}

/// Drops every rotation of `piece` in every column, calling `f` with the piece in place.
///
/// Rotations are visited in order `0..num_rotations`, each counted from `piece`
/// as given, and columns from left to right. A rotation wider than the board
/// gets no placements. The board is identical before and after the call, also
/// when a placement fails.
pub fn for_each_placement<B, F>(
    board: &mut B,
    piece: &B::Piece,
    mut f: F,
) -> Result<PlacementIndex, EvaluateError>
where
    B: GameBoard + ?Sized,
    F: FnMut(Placement, &B::Piece, &B),
{
    let width = board.width();
    let mut index = PlacementIndex::default();

    for rotation in 0..piece.num_rotations() {
        let rotated = piece.nth_rotation(rotation);
        let Some(last_column) = width.checked_sub(rotated.width()) else {
            index.push_rotation(0);
            continue;
        };

        for column in 0..=last_column {
            let row = board.row_after_drop(&rotated, column);
            let placed = PlacementGuard::place(board, &rotated, column, row)
                .map_err(EvaluateError::Place)?;
            let placement = Placement {
                rotation,
                column,
                row,
            };
            log::trace!("trying rotation {rotation} at column {column}, row {row}");
            f(placement, &rotated, &placed);
        }
        index.push_rotation(last_column + 1);
    }

    Ok(index)
}

/// Measures every placement of `piece`.
///
/// Returns the metrics in flat-index order together with the index that decodes
/// them.
pub fn simulate<B>(
    board: &mut B,
    piece: &B::Piece,
    snapshot: &PreMoveSnapshot,
) -> Result<(Vec<PlacementMetrics>, PlacementIndex), EvaluateError>
where
    B: GameBoard + ?Sized,
{
    let mut placements = Vec::new();
    let index = for_each_placement(board, piece, |placement, rotated, placed| {
        placements.push(PlacementMetrics::measure(
            placed,
            snapshot,
            placement,
            rotated.width(),
        ));
    })?;
    Ok((placements, index))
}

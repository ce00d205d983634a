//! Collaborator traits consumed by the move selector.
//!
//! A brain never inspects board storage or piece geometry directly. It asks
//! the board for column heights and cell occupancy, drops pieces with
//! [`GameBoard::place`] and takes them back with [`GameBoard::undo`].

use crate::PlaceError;

/// Outcome of a successful [`GameBoard::place`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PlaceResult {
    /// The piece was placed and no row became full.
    Placed,
    /// The piece was placed and at least one row is now full.
    ///
    /// Placing never clears rows; the full rows stay on the board until the
    /// owner of the board clears them.
    RowFilled,
}

/// A piece in one particular orientation.
pub trait GamePiece: Clone {
    /// Number of columns spanned in the current orientation.
    fn width(&self) -> usize;

    /// Number of rows spanned in the current orientation.
    fn height(&self) -> usize;

    /// Number of distinct orientations of this piece.
    fn num_rotations(&self) -> usize;

    /// The orientation one counter-clockwise turn away.
    #[must_use]
    fn next_rotation(&self) -> Self;

    /// The orientation `n` turns away from this one.
    ///
    /// `nth_rotation(0)` is the piece itself and `n` wraps around
    /// [`num_rotations`](Self::num_rotations).
    #[must_use]
    fn nth_rotation(&self, n: usize) -> Self;
}

/// A grid that pieces can be dropped onto.
///
/// Coordinates are `(x, y)` with `x` counted from the left edge and `y` from
/// the floor. Column height is one more than the `y` of the topmost occupied
/// cell in that column, or 0 for an empty column.
pub trait GameBoard {
    type Piece: GamePiece;

    fn width(&self) -> usize;

    fn column_height(&self, x: usize) -> usize;

    fn has_block_at(&self, x: usize, y: usize) -> bool;

    /// Height of the tallest column.
    fn largest_height(&self) -> usize;

    /// Row at which the lowest cells of `piece` come to rest when dropped
    /// straight down with its left edge at column `x`.
    fn row_after_drop(&self, piece: &Self::Piece, x: usize) -> usize;

    /// Fills the cells of `piece` with its bottom-left corner at `(x, y)`.
    ///
    /// A failed placement must leave the board untouched.
    fn place(&mut self, piece: &Self::Piece, x: usize, y: usize)
    -> Result<PlaceResult, PlaceError>;

    /// Reverts the most recent successful [`place`](Self::place).
    ///
    /// Calling `undo` with no pending placement is a no-op.
    fn undo(&mut self);
}

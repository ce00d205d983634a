//! Measurements of a single placement.
//!
//! Every function here reads the board *after* the piece has been placed (and
//! before it is undone). Metrics that compare against the pre-move state take
//! the [`PreMoveSnapshot`] captured at the start of the decision.

use rankdrop_engine::GameBoard;
use serde::Serialize;

use crate::{
    signed,
    survey::{PreMoveSnapshot, column_holes},
};

/// How many neighbouring columns on each side [`cave_score`] compares against.
pub const CAVE_REACH: usize = 3;

/// Where a candidate piece was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Rotation index relative to the piece as given.
    pub rotation: usize,
    pub column: usize,
    /// Row the piece came to rest on.
    pub row: usize,
}

/// Ranks of a placement among all candidates of one decision, 0 being best.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricRanks {
    pub new_holes: usize,
    pub old_holes: usize,
    pub cave: usize,
    pub height_delta: usize,
}

/// Everything measured about one candidate placement.
///
/// Ranks and score are filled in once every candidate has been measured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementMetrics {
    pub placement: Placement,
    /// Holes created (or, when negative, filled) in the spanned columns.
    pub new_holes: i64,
    /// Holes that already existed in the spanned columns.
    pub old_holes: usize,
    pub cave_score: i64,
    /// Pre-move maximum height minus post-move maximum height.
    pub height_delta: i64,
    pub max_height_after: usize,
    pub rows_cleared: usize,
    pub ranks: MetricRanks,
    pub score: f64,
}

impl PlacementMetrics {
    /// Measures a placement of a piece `piece_width` columns wide.
    ///
    /// `board` must hold the placed piece.
    #[must_use]
    pub fn measure<B>(
        board: &B,
        snapshot: &PreMoveSnapshot,
        placement: Placement,
        piece_width: usize,
    ) -> Self
    where
        B: GameBoard + ?Sized,
    {
        Self {
            placement,
            new_holes: new_holes(board, snapshot, placement.column, piece_width),
            old_holes: old_holes(snapshot, placement.column, piece_width),
            cave_score: cave_score(board, placement.column, piece_width),
            height_delta: height_delta(board, snapshot.max_height()),
            max_height_after: max_height_after(board),
            rows_cleared: rows_cleared(board),
            ranks: MetricRanks::default(),
            score: 0.0,
        }
    }
}

/// Change in hole count over the columns the piece spans.
///
/// Can be negative when the placement exposes or fills cells that used to be
/// holes.
#[must_use]
pub fn new_holes<B>(
    board: &B,
    snapshot: &PreMoveSnapshot,
    column: usize,
    piece_width: usize,
) -> i64
where
    B: GameBoard + ?Sized,
{
    let before = snapshot.holes_per_column();
    (column..column + piece_width)
        .map(|x| signed(column_holes(board, x)) - signed(before[x]))
        .sum()
}

/// Holes present before the move in the columns the piece spans.
#[must_use]
pub fn old_holes(snapshot: &PreMoveSnapshot, column: usize, piece_width: usize) -> usize {
    snapshot.holes_per_column()[column..column + piece_width]
        .iter()
        .sum()
}

/// Average height difference between the piece's edge columns and their
/// neighbours.
///
/// Each edge is compared against up to [`CAVE_REACH`] neighbours on its outer
/// side. When the nearest neighbour is lower than the edge, only the farther
/// neighbours that are also lower count; otherwise all of them count. A piece
/// whose edge sits next to the outermost column counts that side twice.
/// The average is rounded half up; without neighbours the score is 0.
#[must_use]
pub fn cave_score<B>(board: &B, column: usize, piece_width: usize) -> i64
where
    B: GameBoard + ?Sized,
{
    let width = board.width();
    let left_edge = column;
    let right_edge = column + piece_width - 1;

    let left_factor = if left_edge == 1 { 2 } else { 1 };
    let right_factor = if right_edge + 2 == width { 2 } else { 1 };

    let left_neighbours = (1..=CAVE_REACH).filter_map(|i| left_edge.checked_sub(i));
    let right_neighbours = (1..=CAVE_REACH)
        .map(|i| right_edge + i)
        .filter(|&x| x < width);

    let (left_sum, left_count) = side_depth(board, left_edge, left_neighbours, left_factor);
    let (right_sum, right_count) = side_depth(board, right_edge, right_neighbours, right_factor);

    let count = left_count + right_count;
    if count == 0 {
        return 0;
    }
    #[expect(clippy::cast_precision_loss)]
    let average = (left_sum + right_sum) as f64 / count as f64;
    round_half_up(average)
}

fn side_depth<B>(
    board: &B,
    edge: usize,
    neighbours: impl Iterator<Item = usize>,
    factor: i64,
) -> (i64, usize)
where
    B: GameBoard + ?Sized,
{
    let edge_height = signed(board.column_height(edge));
    let mut sum = 0;
    let mut count = 0;
    let mut nearest_is_lower = false;
    for (i, x) in neighbours.enumerate() {
        let diff = edge_height - signed(board.column_height(x));
        if i == 0 {
            nearest_is_lower = diff > 0;
        } else if nearest_is_lower && diff <= 0 {
            continue;
        }
        sum += diff * factor;
        count += 1;
    }
    (sum, count)
}

/// Rounds to the nearest integer, halves toward positive infinity.
#[expect(clippy::cast_possible_truncation)]
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// How much the tallest column shrank; negative when the stack grew.
#[must_use]
pub fn height_delta<B>(board: &B, pre_move_max_height: usize) -> i64
where
    B: GameBoard + ?Sized,
{
    signed(pre_move_max_height) - signed(board.largest_height())
}

#[must_use]
pub fn max_height_after<B>(board: &B) -> usize
where
    B: GameBoard + ?Sized,
{
    board.largest_height()
}

/// Number of completely filled rows.
#[must_use]
pub fn rows_cleared<B>(board: &B) -> usize
where
    B: GameBoard + ?Sized,
{
    let width = board.width();
    (0..board.largest_height())
        .filter(|&y| (0..width).all(|x| board.has_block_at(x, y)))
        .count()
}

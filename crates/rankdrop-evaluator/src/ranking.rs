//! Rank normalisation of placement metrics.
//!
//! A rank is the number of candidates that did strictly better. Equal values
//! share a rank and the following rank is skipped, so ranks over `n`
//! candidates always lie in `0..n`.

use std::cmp::Reverse;

use crate::metrics::{MetricRanks, PlacementMetrics};

/// Ranks values where smaller is better.
///
/// ```
/// use rankdrop_evaluator::rank_ascending;
///
/// assert_eq!(rank_ascending(&[1, 6, 6, 3, 3, 3]), [0, 4, 4, 1, 1, 1]);
/// ```
#[must_use]
pub fn rank_ascending<T>(values: &[T]) -> Vec<usize>
where
    T: Ord + Copy,
{
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    values
        .iter()
        .map(|value| sorted.partition_point(|s| s < value))
        .collect()
}

/// Ranks values where larger is better.
#[must_use]
pub fn rank_descending<T>(values: &[T]) -> Vec<usize>
where
    T: Ord + Copy,
{
    let reversed: Vec<Reverse<T>> = values.iter().copied().map(Reverse).collect();
    rank_ascending(&reversed)
}

/// Fills in the ranks of every placement.
///
/// Fewer new holes, fewer old holes and a lower cave score rank better; a
/// larger height reduction ranks better. Re-ranking the same placements gives
/// the same ranks.
pub fn rank_all(placements: &mut [PlacementMetrics]) {
    fn column<T>(placements: &[PlacementMetrics], f: impl Fn(&PlacementMetrics) -> T) -> Vec<T> {
        placements.iter().map(f).collect()
    }

    let new_holes = rank_ascending(&column(placements, |m| m.new_holes));
    let old_holes = rank_ascending(&column(placements, |m| m.old_holes));
    let cave = rank_ascending(&column(placements, |m| m.cave_score));
    let height_delta = rank_descending(&column(placements, |m| m.height_delta));

    for (i, metrics) in placements.iter_mut().enumerate() {
        metrics.ranks = MetricRanks {
            new_holes: new_holes[i],
            old_holes: old_holes[i],
            cave: cave[i],
            height_delta: height_delta[i],
        };
    }
}

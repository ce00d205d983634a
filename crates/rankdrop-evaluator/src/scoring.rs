//! Weighted scoring and selection.
//!
//! ```text
//! score = w_new    * (n - rank_new)    / n
//!       + w_old    * (n - rank_old)    / n
//!       + w_cave   * (n - rank_cave)   / n
//!       + w_height * (n - rank_height) / n
//!       + w_rows   * rows_cleared
//! ```
//!
//! `n` is the number of candidate placements. Lower is better. A placement
//! whose stack reaches the height limit gets a fixed penalty instead.

use crate::{metrics::PlacementMetrics, signed, weights::Weights};

/// Penalty for a stack of `max_height_after` against `height_limit`.
///
/// Grows by 100 for every row above the limit and is 300 right at it.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn height_limit_penalty(height_limit: usize, max_height_after: usize) -> f64 {
    ((3 - (signed(height_limit) - signed(max_height_after))) * 100) as f64
}

/// Scores one placement out of `total` candidates.
///
/// `metrics.ranks` must already be filled in.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn score_placement(
    weights: &Weights,
    metrics: &PlacementMetrics,
    total: usize,
    height_limit: usize,
) -> f64 {
    if metrics.max_height_after >= height_limit {
        return height_limit_penalty(height_limit, metrics.max_height_after);
    }

    let n = total as f64;
    let term = |weight: f64, rank: usize| weight * (total - rank) as f64 / n;
    let ranks = &metrics.ranks;
    term(weights.new_holes, ranks.new_holes)
        + term(weights.old_holes, ranks.old_holes)
        + term(weights.cave, ranks.cave)
        + term(weights.height_delta, ranks.height_delta)
        + weights.rows_cleared * metrics.rows_cleared as f64
}

/// Scores every ranked placement.
pub fn score_all(placements: &mut [PlacementMetrics], weights: &Weights, height_limit: usize) {
    let total = placements.len();
    for metrics in placements {
        metrics.score = score_placement(weights, metrics, total, height_limit);
    }
}

/// Index of the lowest score; the earliest one wins ties.
///
/// Returns `None` when there is nothing to choose from.
#[must_use]
pub fn select_best(placements: &[PlacementMetrics]) -> Option<usize> {
    let (first, rest) = placements.split_first()?;
    let mut best = (0, first.score);
    for (i, metrics) in rest.iter().enumerate() {
        if metrics.score < best.1 {
            best = (i + 1, metrics.score);
        }
    }
    Some(best.0)
}

use serde::Serialize;

/// Points per piece drop, indexed by the number of rows it cleared.
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Running totals for a headless game.
///
/// # Example
///
/// ```
/// use rankdrop_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(0);
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.completed_pieces(), 2);
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_rows(), 4);
/// assert_eq!(stats.row_cleared_counter(), &[1, 0, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_rows: usize,
    row_cleared_counter: [usize; 5],
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_rows: 0,
            row_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Number of pieces locked onto the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_rows(&self) -> usize {
        self.total_cleared_rows
    }

    /// How many drops cleared 0, 1, 2, 3 and 4 rows.
    #[must_use]
    pub const fn row_cleared_counter(&self) -> &[usize; 5] {
        &self.row_cleared_counter
    }

    /// Records one locked piece that cleared `cleared_rows` rows.
    pub fn complete_piece_drop(&mut self, cleared_rows: usize) {
        self.completed_pieces += 1;
        self.total_cleared_rows += cleared_rows;
        if let Some(counter) = self.row_cleared_counter.get_mut(cleared_rows) {
            *counter += 1;
        }
        self.score += SCORE_TABLE
            .get(cleared_rows)
            .copied()
            .unwrap_or(SCORE_TABLE[SCORE_TABLE.len() - 1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        let mut stats = GameStats::new();
        for rows in 0..=4 {
            stats.complete_piece_drop(rows);
        }
        assert_eq!(stats.score(), 1700);
        assert_eq!(stats.completed_pieces(), 5);
        assert_eq!(stats.total_cleared_rows(), 10);
        assert_eq!(stats.row_cleared_counter(), &[1; 5]);
    }

    #[test]
    fn test_serializes_counters() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(2);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["score"], 300);
        assert_eq!(json["completed_pieces"], 1);
        assert_eq!(json["row_cleared_counter"][2], 1);
    }
}

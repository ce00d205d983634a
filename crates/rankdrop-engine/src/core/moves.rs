use serde::{Deserialize, Serialize};

/// A placement decision: which orientation to drop, where, and how it scored.
///
/// `row` is the row the piece's lowest cells rest on. `score` is optional
/// because not every brain scores its decisions; lower scores are better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move<P> {
    piece: P,
    column: usize,
    row: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
}

impl<P> Move<P> {
    #[must_use]
    pub fn new(piece: P, column: usize, row: usize) -> Self {
        Self {
            piece,
            column,
            row,
            score: None,
        }
    }

    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    #[must_use]
    pub fn piece(&self) -> &P {
        &self.piece
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.score
    }
}

use serde::{Deserialize, Serialize};

/// Relative importance of each metric in a placement's score.
///
/// Lower scores are better, so every default weight is negative: a placement
/// with the best rank in a metric collects the full (negative) weight, the worst
/// one collects almost nothing. `rows_cleared` multiplies the raw row count.
///
/// Missing fields fall back to the defaults when deserializing:
///
/// ```
/// use rankdrop_evaluator::Weights;
///
/// let weights: Weights = serde_json::from_str(r#"{ "cave": -3.0 }"#).unwrap();
/// assert_eq!(weights.cave, -3.0);
/// assert_eq!(weights.rows_cleared, Weights::DEFAULT.rows_cleared);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Weights {
    pub new_holes: f64,
    pub old_holes: f64,
    pub cave: f64,
    pub height_delta: f64,
    pub rows_cleared: f64,
}

impl Weights {
    pub const DEFAULT: Self = Self {
        new_holes: -1.0,
        old_holes: -1.8,
        cave: -2.2,
        height_delta: -1.7,
        rows_cleared: -50.0,
    };
}

impl Default for Weights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let w = Weights::default();
        assert_eq!(w.new_holes, -1.0);
        assert_eq!(w.old_holes, -1.8);
        assert_eq!(w.cave, -2.2);
        assert_eq!(w.height_delta, -1.7);
        assert_eq!(w.rows_cleared, -50.0);
    }

    #[test]
    fn test_json_round_trip() {
        let weights = Weights {
            new_holes: -2.5,
            ..Weights::DEFAULT
        };
        let json = serde_json::to_string(&weights).unwrap();
        let back: Weights = serde_json::from_str(&json).unwrap();
        assert_eq!(back, weights);
    }

    #[test]
    fn test_empty_object_is_default() {
        let weights: Weights = serde_json::from_str("{}").unwrap();
        assert_eq!(weights, Weights::DEFAULT);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_json::from_str::<Weights>(r#"{ "caves": -1.0 }"#);
        assert!(result.is_err());
    }
}

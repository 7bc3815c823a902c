//! Confusion-matrix operating points and their rate views.

/// Counts of false and true positives at one decision threshold.
///
/// Along a curve both counts are non-decreasing and the first point is the
/// origin. Rate accessors return 0.0 when their denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfusionPoint {
    false_positives: u64,
    true_positives: u64,
}

impl ConfusionPoint {
    pub const fn new(false_positives: u64, true_positives: u64) -> Self {
        Self {
            false_positives,
            true_positives,
        }
    }

    /// The (0, 0) point every curve starts from.
    pub const fn origin() -> Self {
        Self::new(0, 0)
    }

    /// x coordinate of the raw-count curve.
    #[inline]
    pub fn false_positives(&self) -> u64 {
        self.false_positives
    }

    /// y coordinate of the raw-count curve.
    #[inline]
    pub fn true_positives(&self) -> u64 {
        self.true_positives
    }

    /// False positive rate: `FP / n_neg`.
    pub fn false_positive_rate(&self, n_neg: u64) -> f64 {
        ratio(self.false_positives, n_neg)
    }

    /// True positive rate: `TP / n_pos`.
    pub fn true_positive_rate(&self, n_pos: u64) -> f64 {
        ratio(self.true_positives, n_pos)
    }

    /// Recall, identical to the true positive rate.
    pub fn recall(&self, n_pos: u64) -> f64 {
        self.true_positive_rate(n_pos)
    }

    /// Precision: `TP / (TP + FP)`.
    pub fn precision(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_positives,
        )
    }

    /// Whether neither count decreases from `self` to `next`.
    pub fn precedes(&self, next: &ConfusionPoint) -> bool {
        self.false_positives <= next.false_positives && self.true_positives <= next.true_positives
    }
}

/// A point of the precision-recall view of a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrPoint {
    pub recall: f64,
    pub precision: f64,
}

fn ratio(num: u64, denom: u64) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

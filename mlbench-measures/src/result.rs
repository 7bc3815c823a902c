//! Scored classification results, the input of the curve sweep.

use mlbench_core::{Label, Labeled, MlbenchError, Result, Scored};

use crate::numeric::Numeric;

/// A classification score paired with the example's ground-truth label.
///
/// Immutable once built. Any type implementing [`Scored`] and [`Labeled`]
/// can be swept instead; this is the ready-made carrier.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredResult<N = f64> {
    score: N,
    label: Label,
}

impl<N: Numeric> ScoredResult<N> {
    pub fn new(score: N, label: Label) -> Self {
        Self { score, label }
    }

    /// A result for a positive example.
    pub fn positive(score: N) -> Self {
        Self::new(score, Label::Positive)
    }

    /// A result for a negative example.
    pub fn negative(score: N) -> Self {
        Self::new(score, Label::Negative)
    }

    /// Build a result from a float score, converting it into `N`.
    ///
    /// # Errors
    ///
    /// Returns an error if `score` is NaN or infinite.
    pub fn from_f64(score: f64, label: Label) -> Result<Self> {
        let converted = N::from_float(score).ok_or_else(|| {
            MlbenchError::InvalidInput(format!("score {score} is not a finite number"))
        })?;
        Ok(Self::new(converted, label))
    }

    pub fn score(&self) -> N {
        self.score
    }

    pub fn label(&self) -> Label {
        self.label
    }
}

impl<N: Numeric> Scored for ScoredResult<N> {
    type Score = N;

    fn score(&self) -> N {
        self.score
    }
}

impl<N: Numeric> Labeled for ScoredResult<N> {
    fn label(&self) -> Label {
        self.label
    }
}

//! Core trait definitions for the mlbench crates.
//!
//! These traits define what a classification result must expose for the
//! curve builders to consume it without conversion.

/// Ground-truth class of an example in a two-class problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Whether this is the positive class.
    #[inline]
    pub fn is_positive(self) -> bool {
        matches!(self, Label::Positive)
    }
}

impl From<bool> for Label {
    fn from(positive: bool) -> Self {
        if positive {
            Label::Positive
        } else {
            Label::Negative
        }
    }
}

/// A type that carries a classification score (probability-like value).
pub trait Scored {
    /// The numeric type of the score.
    type Score: Copy;

    /// The score value.
    fn score(&self) -> Self::Score;
}

/// A type that carries a ground-truth two-class label.
pub trait Labeled {
    /// The label value.
    fn label(&self) -> Label;
}

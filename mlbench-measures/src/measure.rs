//! Area-under-curve measure over one set of scored results.
//!
//! [`Measure`] sweeps the results once at construction, keeps the closed
//! curve for its lifetime and integrates it lazily. The area is cached
//! after the first successful integration; the inputs never change, so
//! later calls return the same value.

use std::cell::OnceCell;

use mlbench_core::{Labeled, MlbenchError, Result, Scored};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::curve::build_curve;
use crate::integrate::{integrate, integrate_xy};
use crate::numeric::Numeric;
use crate::point::{ConfusionPoint, PrPoint};
use crate::precision::PrecisionPolicy;
use crate::result::ScoredResult;

/// AUC measure with native floating-point arithmetic.
pub type FloatMeasure = Measure<f64>;

/// AUC measure with fixed-precision decimal arithmetic.
pub type DecimalMeasure = Measure<Decimal>;

/// Curve and area under it for one classifier evaluation.
#[derive(Debug, Clone)]
pub struct Measure<N: Numeric = Decimal> {
    n_pos: u64,
    n_neg: u64,
    policy: PrecisionPolicy,
    points: Vec<ConfusionPoint>,
    auc: OnceCell<N>,
}

impl<N: Numeric> Measure<N> {
    /// Sweep `results` into a closed curve ending at `(n_neg, n_pos)`.
    ///
    /// `n_pos` and `n_neg` should equal the label counts in `results`; a
    /// mismatch is logged but not rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy's scale is out of range or the sweep
    /// detects an [`MlbenchError::OrderViolation`].
    ///
    /// # Example
    ///
    /// ```
    /// use mlbench_measures::{DecimalMeasure, PrecisionPolicy, ScoredResult};
    /// use rust_decimal::Decimal;
    ///
    /// let results = vec![
    ///     ScoredResult::positive(Decimal::new(9, 1)),
    ///     ScoredResult::positive(Decimal::new(8, 1)),
    ///     ScoredResult::negative(Decimal::new(3, 1)),
    /// ];
    /// let m = DecimalMeasure::new(2, 1, &results, PrecisionPolicy::default()).unwrap();
    /// assert_eq!(m.auc().unwrap(), Decimal::from(2));
    /// assert_eq!(m.normalized_auc().unwrap(), Decimal::ONE);
    /// ```
    pub fn new<T>(n_pos: u64, n_neg: u64, results: &[T], policy: PrecisionPolicy) -> Result<Self>
    where
        T: Scored<Score = N> + Labeled,
    {
        policy.validate()?;
        let curve = build_curve(results)?;

        let tally = curve.tally();
        if tally.true_positives() != n_pos || tally.false_positives() != n_neg {
            warn!(
                declared_pos = n_pos,
                declared_neg = n_neg,
                observed_pos = tally.true_positives(),
                observed_neg = tally.false_positives(),
                "declared class totals differ from observed labels"
            );
        }

        Ok(Self {
            n_pos,
            n_neg,
            policy,
            points: curve.closed(n_pos, n_neg),
            auc: OnceCell::new(),
        })
    }

    pub fn n_positives(&self) -> u64 {
        self.n_pos
    }

    pub fn n_negatives(&self) -> u64 {
        self.n_neg
    }

    pub fn policy(&self) -> &PrecisionPolicy {
        &self.policy
    }

    /// The closed raw-count curve, for plotting.
    pub fn curve_points(&self) -> &[ConfusionPoint] {
        &self.points
    }

    /// Unrounded area under the raw-count curve.
    ///
    /// A perfect ranking gives `n_pos * n_neg`, an uninformative one half
    /// of that.
    ///
    /// # Errors
    ///
    /// Returns [`MlbenchError::InsufficientData`] if the curve has a single
    /// point (no results and zero totals).
    pub fn auc(&self) -> Result<N> {
        if let Some(&auc) = self.auc.get() {
            return Ok(auc);
        }
        let auc = integrate(&self.points, &self.policy)?;
        debug!(points = self.points.len(), %auc, "integrated curve");
        Ok(*self.auc.get_or_init(|| auc))
    }

    /// The area rounded to the policy's scale, as a float.
    ///
    /// # Errors
    ///
    /// Same as [`Measure::auc`].
    pub fn measure(&self) -> Result<f64> {
        Ok(self.auc()?.rounded(&self.policy).to_float())
    }

    /// Area under the rate curve: `auc / (n_pos * n_neg)`, in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if either class total is zero, or as
    /// [`Measure::auc`].
    pub fn normalized_auc(&self) -> Result<N> {
        if self.n_pos == 0 || self.n_neg == 0 {
            return Err(MlbenchError::InvalidInput(
                "normalized AUC needs positive and negative examples".into(),
            ));
        }
        let cells = N::from_count(self.n_pos)
            .mul_checked(N::from_count(self.n_neg))
            .ok_or_else(|| MlbenchError::Arithmetic("class total product overflows".into()))?;
        self.auc()?
            .div_rounded(cells, &self.policy)
            .ok_or_else(|| MlbenchError::Arithmetic("normalized AUC is not representable".into()))
    }

    /// `(false positive rate, true positive rate)` per curve point.
    pub fn roc_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| {
                (
                    p.false_positive_rate(self.n_neg),
                    p.true_positive_rate(self.n_pos),
                )
            })
            .collect()
    }

    /// Precision-recall view of the curve. The origin is anchored at
    /// precision 1.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_pos` is zero.
    pub fn pr_points(&self) -> Result<Vec<PrPoint>> {
        self.require_positives()?;
        Ok(self
            .points
            .iter()
            .map(|p| PrPoint {
                recall: p.recall(self.n_pos),
                precision: if *p == ConfusionPoint::origin() {
                    1.0
                } else {
                    p.precision()
                },
            })
            .collect())
    }

    /// Area under the precision-recall curve.
    ///
    /// Recall and precision are each divided with the policy's rounding
    /// before the trapezoid sum.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_pos` is zero or the curve has fewer than two
    /// points.
    pub fn pr_auc(&self) -> Result<N> {
        self.require_positives()?;
        let n_pos = N::from_count(self.n_pos);
        let one = N::from_count(1);
        let mut coords = Vec::with_capacity(self.points.len());
        for p in &self.points {
            let tp = N::from_count(p.true_positives());
            let predicted = p.true_positives() + p.false_positives();
            let recall = tp.div_rounded(n_pos, &self.policy);
            let precision = if predicted == 0 {
                Some(one)
            } else {
                tp.div_rounded(N::from_count(predicted), &self.policy)
            };
            match (recall, precision) {
                (Some(r), Some(p)) => coords.push((r, p)),
                _ => {
                    return Err(MlbenchError::Arithmetic(
                        "precision-recall coordinate is not representable".into(),
                    ))
                }
            }
        }
        integrate_xy(&coords, &self.policy)
    }

    fn require_positives(&self) -> Result<()> {
        if self.n_pos == 0 {
            return Err(MlbenchError::InvalidInput(
                "precision-recall needs positive examples".into(),
            ));
        }
        Ok(())
    }
}

/// One classifier evaluation's inputs: declared totals and scored results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultSet<N = f64> {
    pub n_pos: u64,
    pub n_neg: u64,
    pub results: Vec<ScoredResult<N>>,
}

impl<N: Numeric> ResultSet<N> {
    /// Collect results, taking the totals from their labels.
    pub fn from_results(results: Vec<ScoredResult<N>>) -> Self {
        let n_pos = results.iter().filter(|r| r.label().is_positive()).count() as u64;
        let n_neg = results.len() as u64 - n_pos;
        Self {
            n_pos,
            n_neg,
            results,
        }
    }

    /// Build the measure for this set.
    ///
    /// # Errors
    ///
    /// Same as [`Measure::new`].
    pub fn measure(&self, policy: PrecisionPolicy) -> Result<Measure<N>> {
        Measure::new(self.n_pos, self.n_neg, &self.results, policy)
    }
}

/// Evaluate independent result sets, one measure each, in input order.
///
/// With the `parallel` feature the sets are evaluated on the rayon pool.
pub fn evaluate_batch<N: Numeric>(sets: &[ResultSet<N>], policy: &PrecisionPolicy) -> Vec<Result<f64>> {
    debug!(sets = sets.len(), "evaluating result sets");
    let evaluate = |set: &ResultSet<N>| set.measure(*policy)?.measure();

    #[cfg(feature = "parallel")]
    let scores = {
        use rayon::prelude::*;
        sets.par_iter().map(evaluate).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let scores = sets.iter().map(evaluate).collect();

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::Rounding;
    use rust_decimal_macros::dec;

    fn alternating() -> Vec<ScoredResult<f64>> {
        vec![
            ScoredResult::positive(0.9),
            ScoredResult::negative(0.8),
            ScoredResult::positive(0.7),
            ScoredResult::negative(0.6),
        ]
    }

    fn pts(raw: &[(u64, u64)]) -> Vec<ConfusionPoint> {
        raw.iter().map(|&(fp, tp)| ConfusionPoint::new(fp, tp)).collect()
    }

    #[test]
    fn alternating_scenario() {
        let m = FloatMeasure::new(2, 2, &alternating(), PrecisionPolicy::default()).unwrap();
        assert_eq!(
            m.curve_points(),
            pts(&[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)]).as_slice()
        );
        assert!((m.auc().unwrap() - 3.0).abs() < 1e-12);
        assert!((m.normalized_auc().unwrap() - 0.75).abs() < 1e-12);
        assert!((m.measure().unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn perfect_ranking_fills_the_box() {
        let results: Vec<ScoredResult<Decimal>> = vec![
            ScoredResult::positive(dec!(0.95)),
            ScoredResult::positive(dec!(0.9)),
            ScoredResult::positive(dec!(0.7)),
            ScoredResult::negative(dec!(0.4)),
            ScoredResult::negative(dec!(0.2)),
        ];
        let m = DecimalMeasure::new(3, 2, &results, PrecisionPolicy::default()).unwrap();
        assert_eq!(m.auc().unwrap(), dec!(6));
        assert_eq!(m.normalized_auc().unwrap(), dec!(1));
        assert_eq!(m.measure().unwrap(), 6.0);
    }

    #[test]
    fn tie_scenario() {
        let results = vec![ScoredResult::positive(0.5), ScoredResult::negative(0.5)];
        let m = FloatMeasure::new(1, 1, &results, PrecisionPolicy::default()).unwrap();
        assert_eq!(m.curve_points(), pts(&[(0, 0), (1, 1)]).as_slice());
        assert_eq!(m.auc().unwrap(), 0.5);
        assert_eq!(m.normalized_auc().unwrap(), 0.5);
    }

    #[test]
    fn uninformative_scores_give_half() {
        let results: Vec<ScoredResult<Decimal>> = (0..7)
            .map(|i| ScoredResult::new(dec!(0.42), (i % 3 == 0).into()))
            .collect();
        // 3 positives, 4 negatives
        let m = DecimalMeasure::new(3, 4, &results, PrecisionPolicy::default()).unwrap();
        assert_eq!(m.auc().unwrap(), dec!(6));
        assert_eq!(m.normalized_auc().unwrap(), dec!(0.5));
    }

    #[test]
    fn order_violation_is_returned() {
        let results = vec![ScoredResult::positive(0.3), ScoredResult::negative(f64::NAN)];
        let err = FloatMeasure::new(1, 1, &results, PrecisionPolicy::default()).unwrap_err();
        assert!(matches!(err, MlbenchError::OrderViolation { .. }));
    }

    #[test]
    fn empty_input_is_undefined() {
        let results: Vec<ScoredResult<f64>> = Vec::new();
        let m = FloatMeasure::new(0, 0, &results, PrecisionPolicy::default()).unwrap();
        assert!(matches!(
            m.auc(),
            Err(MlbenchError::InsufficientData { points: 1 })
        ));
        assert!(m.measure().is_err());
        assert!(m.normalized_auc().is_err());
    }

    #[test]
    fn invalid_policy_rejected() {
        let policy = PrecisionPolicy::default().with_scale(30);
        assert!(FloatMeasure::new(2, 2, &alternating(), policy).is_err());
    }

    #[test]
    fn auc_is_cached_and_stable() {
        let m = FloatMeasure::new(2, 2, &alternating(), PrecisionPolicy::default()).unwrap();
        let first = m.auc().unwrap();
        let second = m.auc().unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn normalized_auc_rounds_at_division() {
        // curve (0,0) (0,1) (0,2) (1,2) (1,3): area 2 of 3 cells
        let results = vec![
            ScoredResult::positive(dec!(0.9)),
            ScoredResult::positive(dec!(0.8)),
            ScoredResult::negative(dec!(0.7)),
            ScoredResult::positive(dec!(0.6)),
        ];
        let half_up = PrecisionPolicy::new(3, Rounding::HalfUp).unwrap();
        let m = DecimalMeasure::new(3, 1, &results, half_up).unwrap();
        assert_eq!(m.auc().unwrap(), dec!(2));
        assert_eq!(m.normalized_auc().unwrap(), dec!(0.667));

        let down = PrecisionPolicy::new(3, Rounding::Down).unwrap();
        let m = DecimalMeasure::new(3, 1, &results, down).unwrap();
        assert_eq!(m.normalized_auc().unwrap(), dec!(0.666));

        let floats: Vec<ScoredResult<f64>> = vec![
            ScoredResult::positive(0.9),
            ScoredResult::positive(0.8),
            ScoredResult::negative(0.7),
            ScoredResult::positive(0.6),
        ];
        let m = FloatMeasure::new(3, 1, &floats, down).unwrap();
        assert_eq!(m.normalized_auc().unwrap(), 0.666);
    }

    #[test]
    fn roc_points_are_rates() {
        let m = FloatMeasure::new(2, 2, &alternating(), PrecisionPolicy::default()).unwrap();
        let roc = m.roc_points();
        assert_eq!(roc.first(), Some(&(0.0, 0.0)));
        assert_eq!(roc.last(), Some(&(1.0, 1.0)));
        assert_eq!(roc[2], (0.5, 0.5));
    }

    #[test]
    fn pr_view_and_area() {
        let m = FloatMeasure::new(2, 2, &alternating(), PrecisionPolicy::default()).unwrap();
        let pr = m.pr_points().unwrap();
        assert_eq!(pr[0], PrPoint { recall: 0.0, precision: 1.0 });
        assert_eq!(pr[1], PrPoint { recall: 0.5, precision: 1.0 });
        assert_eq!(pr[2], PrPoint { recall: 0.5, precision: 0.5 });

        // perfect ranking has unit precision-recall area
        let results: Vec<ScoredResult<Decimal>> = vec![
            ScoredResult::positive(dec!(0.9)),
            ScoredResult::negative(dec!(0.1)),
        ];
        let m = DecimalMeasure::new(1, 1, &results, PrecisionPolicy::default()).unwrap();
        assert_eq!(m.pr_auc().unwrap(), dec!(1));
    }

    #[test]
    fn pr_needs_positives() {
        let results = vec![ScoredResult::negative(0.2)];
        let m = FloatMeasure::new(0, 1, &results, PrecisionPolicy::default()).unwrap();
        assert!(m.pr_points().is_err());
        assert!(m.pr_auc().is_err());
    }

    #[test]
    fn batch_matches_individual_measures() {
        let sets = vec![
            ResultSet::from_results(alternating()),
            ResultSet::from_results(vec![ScoredResult::positive(0.5), ScoredResult::negative(0.5)]),
            ResultSet::from_results(Vec::new()),
        ];
        assert_eq!(sets[0].n_pos, 2);
        assert_eq!(sets[0].n_neg, 2);

        let scores = evaluate_batch(&sets, &PrecisionPolicy::default());
        assert_eq!(scores.len(), 3);
        assert!((scores[0].as_ref().unwrap() - 3.0).abs() < 1e-12);
        assert!((scores[1].as_ref().unwrap() - 0.5).abs() < 1e-12);
        assert!(matches!(scores[2], Err(MlbenchError::InsufficientData { .. })));
    }

    #[test]
    fn measure_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<FloatMeasure>();
        assert_send::<DecimalMeasure>();
    }
}

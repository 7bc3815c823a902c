//! Threshold sweep from scored results to confusion points.
//!
//! Results are stably sorted by descending score and walked once. A new
//! [`ConfusionPoint`] is emitted each time the score drops below the
//! previous threshold, carrying the counts accumulated *before* that
//! result. Equal scores share one threshold. The closing point with every
//! example classified positive is not emitted; see [`Curve::closed`].

use std::cmp::Ordering;

use mlbench_core::{Labeled, MlbenchError, Result, Scored};
use tracing::debug;

use crate::numeric::Numeric;
use crate::point::ConfusionPoint;

/// Output of the threshold sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    points: Vec<ConfusionPoint>,
    tally: ConfusionPoint,
}

impl Curve {
    /// One point per distinct score, starting at the origin.
    pub fn points(&self) -> &[ConfusionPoint] {
        &self.points
    }

    /// Counts accumulated over every swept result: (negatives, positives)
    /// actually observed.
    pub fn tally(&self) -> ConfusionPoint {
        self.tally
    }

    /// Number of results consumed by the sweep.
    pub fn consumed(&self) -> u64 {
        self.tally.false_positives() + self.tally.true_positives()
    }

    pub fn into_points(self) -> Vec<ConfusionPoint> {
        self.points
    }

    /// The points followed by the end point `(n_neg, n_pos)`.
    ///
    /// The end point is skipped when it equals the last emitted point, so an
    /// empty sweep with zero totals stays a single point.
    pub fn closed(self, n_pos: u64, n_neg: u64) -> Vec<ConfusionPoint> {
        let end = ConfusionPoint::new(n_neg, n_pos);
        let mut points = self.points;
        if points.last() != Some(&end) {
            points.push(end);
        }
        points
    }
}

/// Sweep `results` into a curve.
///
/// # Errors
///
/// Returns [`MlbenchError::OrderViolation`] if, after sorting, a score
/// compares greater than or incomparable to the threshold before it. With
/// the shipped strategies this happens for NaN scores.
///
/// # Example
///
/// ```
/// use mlbench_measures::{build_curve, ConfusionPoint, ScoredResult};
///
/// let results = vec![
///     ScoredResult::positive(0.9),
///     ScoredResult::negative(0.8),
///     ScoredResult::positive(0.7),
///     ScoredResult::negative(0.6),
/// ];
/// let curve = build_curve(&results).unwrap();
/// assert_eq!(curve.points().len(), 4);
/// assert_eq!(curve.points()[2], ConfusionPoint::new(1, 1));
/// ```
pub fn build_curve<T>(results: &[T]) -> Result<Curve>
where
    T: Scored + Labeled,
    T::Score: Numeric,
{
    let mut order: Vec<usize> = (0..results.len()).collect();
    // stable: ties keep input order
    order.sort_by(|&a, &b| results[b].score().sort_cmp(&results[a].score()));

    let curve = sweep(order.iter().map(|&i| &results[i]))?;
    debug!(
        results = results.len(),
        thresholds = curve.points.len() - 1,
        "built confusion curve"
    );
    Ok(curve)
}

/// Walk results already ordered by descending score.
fn sweep<'a, T, I>(ordered: I) -> Result<Curve>
where
    T: Scored + Labeled + 'a,
    T::Score: Numeric,
    I: IntoIterator<Item = &'a T>,
{
    let mut points = vec![ConfusionPoint::origin()];
    let mut true_pos = 0u64;
    let mut false_pos = 0u64;
    // None stands for the +inf threshold before the first result
    let mut previous: Option<T::Score> = None;

    for result in ordered {
        let score = result.score();
        match previous {
            None => {
                if score.compare(&score).is_none() {
                    return Err(violation(score, None));
                }
                previous = Some(score);
            }
            Some(prev) => match score.compare(&prev) {
                Some(Ordering::Less) => {
                    points.push(ConfusionPoint::new(false_pos, true_pos));
                    previous = Some(score);
                }
                Some(Ordering::Equal) => {}
                Some(Ordering::Greater) | None => return Err(violation(score, Some(prev))),
            },
        }

        if result.label().is_positive() {
            true_pos += 1;
        } else {
            false_pos += 1;
        }
    }

    Ok(Curve {
        points,
        tally: ConfusionPoint::new(false_pos, true_pos),
    })
}

fn violation<N: Numeric>(current: N, previous: Option<N>) -> MlbenchError {
    let previous = previous.map_or(f64::INFINITY, Numeric::to_float);
    let current = current.to_float();
    debug!(current, previous, "score order violation");
    MlbenchError::OrderViolation { current, previous }
}

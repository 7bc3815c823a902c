//! Trapezoidal area under a curve.
//!
//! Consecutive points are joined by straight segments and the trapezoids
//! under them are summed. The division by two is the only rounded step;
//! sums and products stay at the strategy's full precision.

use mlbench_core::{MlbenchError, Result};

use crate::numeric::Numeric;
use crate::point::ConfusionPoint;
use crate::precision::PrecisionPolicy;

/// Area under a raw-count curve, with false positives on x and true
/// positives on y.
///
/// # Errors
///
/// Returns [`MlbenchError::InsufficientData`] for fewer than two points,
/// or an arithmetic error if the area overflows the numeric strategy.
///
/// # Example
///
/// ```
/// use mlbench_measures::{integrate, ConfusionPoint, PrecisionPolicy};
/// use rust_decimal::Decimal;
///
/// let points = [ConfusionPoint::new(0, 0), ConfusionPoint::new(0, 2), ConfusionPoint::new(2, 2)];
/// let auc: Decimal = integrate(&points, &PrecisionPolicy::default()).unwrap();
/// assert_eq!(auc, Decimal::from(4));
/// ```
pub fn integrate<N: Numeric>(points: &[ConfusionPoint], policy: &PrecisionPolicy) -> Result<N> {
    let coords: Vec<(N, N)> = points
        .iter()
        .map(|p| {
            (
                N::from_count(p.false_positives()),
                N::from_count(p.true_positives()),
            )
        })
        .collect();
    integrate_xy(&coords, policy)
}

/// Area under an arbitrary `(x, y)` polyline.
///
/// Segments running backwards on x contribute negative area.
///
/// # Errors
///
/// Returns [`MlbenchError::InsufficientData`] for fewer than two points,
/// or an arithmetic error on overflow.
pub fn integrate_xy<N: Numeric>(coords: &[(N, N)], policy: &PrecisionPolicy) -> Result<N> {
    if coords.len() < 2 {
        return Err(MlbenchError::InsufficientData {
            points: coords.len(),
        });
    }

    let two = N::from_count(2);
    let mut area = N::zero();
    for pair in coords.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        let width = x1.sub_checked(x0).ok_or_else(|| overflow("segment width"))?;
        let segment = trapezoid_area(y0, y1, width, two, policy)?;
        area = area.add_checked(segment).ok_or_else(|| overflow("area sum"))?;
    }
    Ok(area)
}

fn trapezoid_area<N: Numeric>(
    base1: N,
    base2: N,
    height: N,
    two: N,
    policy: &PrecisionPolicy,
) -> Result<N> {
    base1
        .add_checked(base2)
        .and_then(|bases| bases.mul_checked(height))
        .and_then(|doubled| doubled.div_rounded(two, policy))
        .ok_or_else(|| overflow("trapezoid area"))
}

fn overflow(step: &str) -> MlbenchError {
    MlbenchError::Arithmetic(format!("{step} is not representable"))
}

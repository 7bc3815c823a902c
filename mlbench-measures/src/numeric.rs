//! Numeric strategies for score comparison and area arithmetic.
//!
//! The curve builder and integrator are written once against [`Numeric`].
//! Two strategies ship with the crate:
//!
//! - `f64` — native floating point, fast, platform rounding
//! - [`Decimal`] — fixed-precision decimal, reproducible across platforms

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::precision::PrecisionPolicy;

/// Arithmetic and ordering needed to sweep scores and integrate a curve.
///
/// Arithmetic returns `None` on overflow, division by zero or a non-finite
/// result; callers turn that into an error.
pub trait Numeric: Copy + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Additive identity.
    fn zero() -> Self;

    /// Exact conversion of a confusion count.
    fn from_count(n: u64) -> Self;

    /// Conversion from a float score. `None` for non-finite input.
    fn from_float(x: f64) -> Option<Self>;

    /// Lossy conversion for reporting.
    fn to_float(self) -> f64;

    /// Semantic comparison used by the threshold sweep.
    ///
    /// `None` means the values are incomparable (e.g. NaN).
    fn compare(&self, other: &Self) -> Option<Ordering>;

    /// Total order used only to sort results before the sweep.
    fn sort_cmp(&self, other: &Self) -> Ordering;

    fn add_checked(self, rhs: Self) -> Option<Self>;

    fn sub_checked(self, rhs: Self) -> Option<Self>;

    fn mul_checked(self, rhs: Self) -> Option<Self>;

    /// Divide, then round the quotient to the policy's scale.
    fn div_rounded(self, rhs: Self, policy: &PrecisionPolicy) -> Option<Self>;

    /// Round to the policy's scale.
    fn rounded(self, policy: &PrecisionPolicy) -> Self;
}

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

impl Numeric for f64 {
    fn zero() -> Self {
        0.0
    }

    fn from_count(n: u64) -> Self {
        n as f64
    }

    fn from_float(x: f64) -> Option<Self> {
        finite(x)
    }

    fn to_float(self) -> f64 {
        self
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        self.partial_cmp(other)
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn add_checked(self, rhs: Self) -> Option<Self> {
        finite(self + rhs)
    }

    fn sub_checked(self, rhs: Self) -> Option<Self> {
        finite(self - rhs)
    }

    fn mul_checked(self, rhs: Self) -> Option<Self> {
        finite(self * rhs)
    }

    fn div_rounded(self, rhs: Self, policy: &PrecisionPolicy) -> Option<Self> {
        if rhs == 0.0 {
            return None;
        }
        finite(self / rhs).map(|q| policy.round_f64(q))
    }

    fn rounded(self, policy: &PrecisionPolicy) -> Self {
        policy.round_f64(self)
    }
}

impl Numeric for Decimal {
    fn zero() -> Self {
        Decimal::ZERO
    }

    fn from_count(n: u64) -> Self {
        Decimal::from(n)
    }

    fn from_float(x: f64) -> Option<Self> {
        if !x.is_finite() {
            return None;
        }
        <Decimal as FromPrimitive>::from_f64(x)
    }

    fn to_float(self) -> f64 {
        <Decimal as ToPrimitive>::to_f64(&self).unwrap_or(f64::NAN)
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn add_checked(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs)
    }

    fn sub_checked(self, rhs: Self) -> Option<Self> {
        self.checked_sub(rhs)
    }

    fn mul_checked(self, rhs: Self) -> Option<Self> {
        self.checked_mul(rhs)
    }

    fn div_rounded(self, rhs: Self, policy: &PrecisionPolicy) -> Option<Self> {
        self.checked_div(rhs).map(|q| policy.round_decimal(q))
    }

    fn rounded(self, policy: &PrecisionPolicy) -> Self {
        policy.round_decimal(self)
    }
}

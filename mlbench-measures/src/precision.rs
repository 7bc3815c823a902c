//! Decimal scale and rounding mode applied wherever the engine divides.
//!
//! A [`PrecisionPolicy`] travels with every measure instance. The curve
//! integrator applies it at the trapezoid division step and the float
//! accessors apply it once more before converting, so two runs over the
//! same curve agree digit for digit.

use mlbench_core::{MlbenchError, Result};
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest scale a [`Decimal`] can represent.
pub const MAX_SCALE: u32 = 28;

/// Rounding mode applied when a value is reduced to the policy's scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rounding {
    /// Away from zero.
    Up,
    /// Towards zero (truncation).
    Down,
    /// Towards positive infinity.
    Ceiling,
    /// Towards negative infinity.
    Floor,
    /// Nearest neighbour, ties away from zero.
    #[default]
    HalfUp,
    /// Nearest neighbour, ties towards zero.
    HalfDown,
    /// Nearest neighbour, ties to the even neighbour.
    HalfEven,
}

impl Rounding {
    /// The equivalent `rust_decimal` strategy.
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::Up => RoundingStrategy::AwayFromZero,
            Rounding::Down => RoundingStrategy::ToZero,
            Rounding::Ceiling => RoundingStrategy::ToPositiveInfinity,
            Rounding::Floor => RoundingStrategy::ToNegativeInfinity,
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::HalfDown => RoundingStrategy::MidpointTowardZero,
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }

    /// Round `x` to an integral value using this mode.
    fn round_integral(self, x: f64) -> f64 {
        match self {
            Rounding::Up => {
                if x >= 0.0 {
                    x.ceil()
                } else {
                    x.floor()
                }
            }
            Rounding::Down => x.trunc(),
            Rounding::Ceiling => x.ceil(),
            Rounding::Floor => x.floor(),
            Rounding::HalfUp => x.round(),
            Rounding::HalfDown => {
                let t = x.trunc();
                if (x - t).abs() == 0.5 {
                    t
                } else {
                    x.round()
                }
            }
            Rounding::HalfEven => x.round_ties_even(),
        }
    }
}

/// Decimal scale plus rounding mode for one measure instance.
///
/// Defaults to 10 fractional digits, rounding half up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrecisionPolicy {
    /// Number of fractional decimal digits kept after rounding.
    pub scale: u32,
    /// Rounding mode used to reach `scale`.
    pub rounding: Rounding,
}

impl Default for PrecisionPolicy {
    fn default() -> Self {
        Self {
            scale: 10,
            rounding: Rounding::HalfUp,
        }
    }
}

impl PrecisionPolicy {
    /// Create a validated policy.
    ///
    /// # Errors
    ///
    /// Returns an error if `scale` exceeds [`MAX_SCALE`].
    pub fn new(scale: u32, rounding: Rounding) -> Result<Self> {
        let policy = Self { scale, rounding };
        policy.validate()?;
        Ok(policy)
    }

    /// Replace the scale, keeping the rounding mode.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Replace the rounding mode, keeping the scale.
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Check that the scale is representable.
    ///
    /// # Errors
    ///
    /// Returns an error if `scale` exceeds [`MAX_SCALE`].
    pub fn validate(&self) -> Result<()> {
        if self.scale > MAX_SCALE {
            return Err(MlbenchError::InvalidInput(format!(
                "scale {} exceeds the maximum decimal scale {}",
                self.scale, MAX_SCALE
            )));
        }
        Ok(())
    }

    /// Round a decimal to this policy's scale.
    pub fn round_decimal(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.scale, self.rounding.strategy())
    }

    /// Round a float to this policy's scale.
    ///
    /// Values whose scaled form is not finite are returned unchanged.
    pub fn round_f64(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.scale as i32);
        let scaled = value * factor;
        if !scaled.is_finite() {
            return value;
        }
        self.rounding.round_integral(scaled) / factor
    }

    /// Parse a policy from JSON, e.g. `{"scale": 6, "rounding": "half_even"}`.
    ///
    /// Missing fields fall back to [`PrecisionPolicy::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the scale is out of range.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(json)
            .map_err(|e| MlbenchError::Parse(format!("precision policy: {e}")))?;
        policy.validate()?;
        tracing::debug!(
            scale = policy.scale,
            rounding = ?policy.rounding,
            "loaded precision policy"
        );
        Ok(policy)
    }

    /// Read and parse a JSON policy file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    #[cfg(feature = "serde")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_policy() {
        let p = PrecisionPolicy::default();
        assert_eq!(p.scale, 10);
        assert_eq!(p.rounding, Rounding::HalfUp);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn scale_out_of_range() {
        assert!(PrecisionPolicy::new(29, Rounding::Down).is_err());
        assert!(PrecisionPolicy::new(28, Rounding::Down).is_ok());
        assert!(PrecisionPolicy::default().with_scale(40).validate().is_err());
    }

    #[test]
    fn decimal_rounding_modes() {
        let v = dec!(2.345);
        let p = PrecisionPolicy::default().with_scale(2);
        assert_eq!(p.with_rounding(Rounding::HalfUp).round_decimal(v), dec!(2.35));
        assert_eq!(p.with_rounding(Rounding::HalfDown).round_decimal(v), dec!(2.34));
        assert_eq!(p.with_rounding(Rounding::HalfEven).round_decimal(v), dec!(2.34));
        assert_eq!(p.with_rounding(Rounding::Down).round_decimal(v), dec!(2.34));
        assert_eq!(p.with_rounding(Rounding::Up).round_decimal(v), dec!(2.35));
        assert_eq!(p.with_rounding(Rounding::Floor).round_decimal(-v), dec!(-2.35));
        assert_eq!(p.with_rounding(Rounding::Ceiling).round_decimal(-v), dec!(-2.34));
    }

    #[test]
    fn float_rounding_modes() {
        let p = PrecisionPolicy::default().with_scale(1);
        assert_eq!(p.with_rounding(Rounding::HalfUp).round_f64(0.25), 0.3);
        assert_eq!(p.with_rounding(Rounding::HalfEven).round_f64(0.25), 0.2);
        assert_eq!(p.with_rounding(Rounding::HalfDown).round_f64(0.25), 0.2);
        assert_eq!(p.with_rounding(Rounding::Up).round_f64(-0.21), -0.3);
        assert_eq!(p.with_rounding(Rounding::Down).round_f64(-0.29), -0.2);
        assert_eq!(p.with_rounding(Rounding::Floor).round_f64(-0.21), -0.3);
        assert_eq!(p.with_rounding(Rounding::Ceiling).round_f64(0.21), 0.3);
    }

    #[test]
    fn float_rounding_passes_through_infinity() {
        let p = PrecisionPolicy::default();
        assert_eq!(p.round_f64(f64::INFINITY), f64::INFINITY);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn policy_from_json() {
        let p = PrecisionPolicy::from_json_str(r#"{"scale": 6, "rounding": "half_even"}"#).unwrap();
        assert_eq!(p, PrecisionPolicy::new(6, Rounding::HalfEven).unwrap());

        let partial = PrecisionPolicy::from_json_str(r#"{"rounding": "floor"}"#).unwrap();
        assert_eq!(partial.scale, 10);
        assert_eq!(partial.rounding, Rounding::Floor);

        assert!(PrecisionPolicy::from_json_str(r#"{"scale": 99}"#).is_err());
        assert!(PrecisionPolicy::from_json_str("not json").is_err());
    }
}

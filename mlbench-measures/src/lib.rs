//! Two-class classifier evaluation: confusion-point curves and the area
//! under them.
//!
//! - **Results** — [`ScoredResult`], a score paired with a ground-truth [`Label`]
//! - **Curves** — [`build_curve`] sweeps descending thresholds into [`ConfusionPoint`]s
//! - **Integration** — [`integrate`] computes trapezoidal area under a curve
//! - **Measures** — [`Measure`] ties the two together for one result set,
//!   with [`evaluate_batch`] for many
//!
//! Every computation is generic over a [`Numeric`] strategy: `f64` for
//! speed, [`rust_decimal::Decimal`] with a [`PrecisionPolicy`] when results
//! must reproduce digit for digit.

pub mod curve;
pub mod integrate;
pub mod measure;
pub mod numeric;
pub mod point;
pub mod precision;
pub mod result;

pub use curve::{build_curve, Curve};
pub use integrate::{integrate, integrate_xy};
pub use measure::{evaluate_batch, DecimalMeasure, FloatMeasure, Measure, ResultSet};
pub use mlbench_core::{Label, Labeled, MlbenchError, Result, Scored};
pub use numeric::Numeric;
pub use point::{ConfusionPoint, PrPoint};
pub use precision::{PrecisionPolicy, Rounding, MAX_SCALE};
pub use result::ScoredResult;

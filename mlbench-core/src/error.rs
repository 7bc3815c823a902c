//! Structured error types for the mlbench crates.

use thiserror::Error;

/// Unified error type for all mlbench operations.
#[derive(Debug, Error)]
pub enum MlbenchError {
    /// A score compared greater than (or incomparable to) the threshold
    /// before it after sorting. Scores are reported as `f64`; the sentinel
    /// threshold before the first result is `+inf`.
    #[error("current score: {current} is greater than previous one: {previous}")]
    OrderViolation { current: f64, previous: f64 },

    /// Fewer than two curve points, so no area can be computed.
    #[error("insufficient data: {points} curve point(s), need at least 2")]
    InsufficientData { points: usize },

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Overflow, division by zero or a non-finite intermediate value
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// Parse error (malformed configuration)
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the mlbench crates.
pub type Result<T> = std::result::Result<T, MlbenchError>;

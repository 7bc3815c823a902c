//! Shared primitives for the mlbench classifier evaluation crates.
//!
//! `mlbench-core` provides the foundation the measure crates build on:
//!
//! - **Error types** — [`MlbenchError`] and [`Result`] for structured error handling
//! - **Traits** — [`Scored`] and [`Labeled`], the contract a classification
//!   result fulfils to be swept into a curve, plus the binary [`Label`]

pub mod error;
pub mod traits;

pub use error::{MlbenchError, Result};
pub use traits::*;
